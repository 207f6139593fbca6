//! `dotlink link <layer>`

use anyhow::bail;

use crate::config::Settings;
use crate::logging::Logger;

/// Create symlinks for a layer and link its executables.
///
/// # Errors
///
/// Fails when the layer does not exist, the roots cannot be resolved, or
/// nothing at all was linked (usually a sign of a wrong layer name or an
/// empty layer directory).
pub fn link(settings: &Settings, log: &Logger, dry_run: bool, layer: &str) -> anyhow::Result<()> {
    let layer_dir = super::resolve_layer(settings, log, layer)?;
    let manager = super::manager(settings, log, dry_run)?;

    let mut count = manager.create_symlinks(&layer_dir, layer);
    count += manager.link_apps(layer);

    if count == 0 {
        bail!("no symlinks created for layer '{layer}'");
    }
    Ok(())
}
