//! `dotlink info`

use crate::config::Settings;
use crate::logging::Logger;

/// Print the resolved configuration and the layers available on disk.
///
/// # Errors
///
/// Infallible today; kept fallible for uniformity with the other handlers.
pub fn info(settings: &Settings, log: &Logger) -> anyhow::Result<()> {
    log.stage("Configuration");
    log.info(&format!("version:       {}", crate::cli::version()));
    log.info(&format!(
        "dotfiles dir:  {}",
        settings.dotfiles_dir.display()
    ));
    log.info(&format!("target dir:    {}", settings.target_dir.display()));
    log.info(&format!("search depth:  {}", settings.search_depth));
    log.info(&format!(
        "cleanup dirs:  {}",
        settings.cleanup_dirs.join(", ")
    ));
    log.info(&format!(
        "exclusions:    {} patterns, {} search prunes",
        settings.exclude_patterns.len(),
        settings.exclude_search_dirs.len()
    ));

    let layers = super::available_layers(settings);
    if layers.is_empty() {
        log.warn(&format!(
            "no layers found under {}",
            settings.platforms_dir().display()
        ));
    } else {
        log.info(&format!("layers:        {}", layers.join(", ")));
    }
    Ok(())
}
