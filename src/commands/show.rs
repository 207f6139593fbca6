//! `dotlink show [layer]`

use crate::config::Settings;
use crate::logging::Logger;

/// List symlinks pointing into the dotfiles repository, optionally
/// restricted to one layer. Read-only.
///
/// # Errors
///
/// Fails when a named layer does not exist or the roots cannot be resolved.
pub fn show(
    settings: &Settings,
    log: &Logger,
    dry_run: bool,
    layer: Option<&str>,
) -> anyhow::Result<()> {
    let filter = match layer {
        Some(name) => Some(super::resolve_layer(settings, log, name)?),
        None => None,
    };
    let manager = super::manager(settings, log, dry_run)?;
    manager.show_symlinks(filter.as_deref(), layer.unwrap_or("all layers"));
    Ok(())
}
