//! `dotlink relink <platform>`

use crate::config::Settings;
use crate::logging::Logger;

/// Remove and recreate the full symlink set for a platform: both layers
/// down, broken links cleaned, common recreated, the overlay on top, apps
/// relinked. Individual steps are best-effort.
///
/// # Errors
///
/// Fails when the platform layer does not exist or the roots cannot be
/// resolved. `common` is rebuilt as part of the sequence and is not a valid
/// argument on its own here.
pub fn relink(
    settings: &Settings,
    log: &Logger,
    dry_run: bool,
    platform: &str,
) -> anyhow::Result<()> {
    super::resolve_layer(settings, log, platform)?;
    let manager = super::manager(settings, log, dry_run)?;
    manager.relink(platform);
    Ok(())
}
