//! Subcommand handlers.
//!
//! Each handler is a thin layer over [`SymlinkManager`]: resolve the layer
//! directory, run the operation, report. Argument problems (an unknown
//! layer name) surface as errors; per-item filesystem trouble is already
//! handled inside the manager.

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ConfigError;
use crate::logging::Logger;
use crate::manager::SymlinkManager;

mod check;
mod info;
mod link;
mod relink;
mod show;
mod unlink;

pub use check::check;
pub use info::info;
pub use link::link;
pub use relink::relink;
pub use show::show;
pub use unlink::unlink;

/// Resolve a layer name to its directory under `platforms/`.
///
/// On failure the available layers are logged before the error is returned,
/// so the user sees what would have worked.
fn resolve_layer(settings: &Settings, log: &Logger, layer: &str) -> anyhow::Result<PathBuf> {
    let dir = settings.layer_dir(layer);
    if dir.is_dir() {
        return Ok(dir);
    }

    let available = available_layers(settings);
    if available.is_empty() {
        log.warn(&format!(
            "no layers found under {}",
            settings.platforms_dir().display()
        ));
    } else {
        log.info(&format!("available layers: {}", available.join(", ")));
    }

    Err(ConfigError::MissingLayer {
        layer: layer.to_string(),
        platforms_dir: settings.platforms_dir().display().to_string(),
    }
    .into())
}

/// Names of the layer directories that actually exist, sorted.
fn available_layers(settings: &Settings) -> Vec<String> {
    let mut layers = Vec::new();
    if let Ok(entries) = std::fs::read_dir(settings.platforms_dir()) {
        for entry in entries.flatten() {
            if entry.path().is_dir() {
                layers.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }
    layers.sort();
    layers
}

/// Build a manager, converting root-resolution failures at the boundary.
fn manager<'a>(
    settings: &'a Settings,
    log: &'a Logger,
    dry_run: bool,
) -> anyhow::Result<SymlinkManager<'a>> {
    Ok(SymlinkManager::new(settings, log, dry_run)?)
}
