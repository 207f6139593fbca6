//! `dotlink unlink <layer>`

use crate::config::Settings;
use crate::logging::Logger;

/// Remove every symlink belonging to a layer, then sweep empty directories.
///
/// Removing zero links is not an error; the layer may simply not be linked.
///
/// # Errors
///
/// Fails when the layer does not exist or the roots cannot be resolved.
pub fn unlink(settings: &Settings, log: &Logger, dry_run: bool, layer: &str) -> anyhow::Result<()> {
    let layer_dir = super::resolve_layer(settings, log, layer)?;
    let manager = super::manager(settings, log, dry_run)?;
    manager.remove_symlinks(&layer_dir, layer);
    Ok(())
}
