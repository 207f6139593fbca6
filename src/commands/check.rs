//! `dotlink check [--no-auto-fix]`

use crate::config::Settings;
use crate::logging::Logger;

/// Find broken dotfiles symlinks. With auto-fix (the default) they are
/// removed and empty directories swept; without it they are only reported.
///
/// # Errors
///
/// Fails when the roots cannot be resolved.
pub fn check(
    settings: &Settings,
    log: &Logger,
    dry_run: bool,
    auto_fix: bool,
) -> anyhow::Result<()> {
    let manager = super::manager(settings, log, dry_run)?;

    if auto_fix {
        manager.check_and_clean();
        return Ok(());
    }

    log.stage("Scanning for broken symlinks");
    let broken = manager.find_broken_symlinks();
    if broken.is_empty() {
        log.info("no broken symlinks found");
        return Ok(());
    }
    let target_root = std::fs::canonicalize(&settings.target_dir)
        .unwrap_or_else(|_| settings.target_dir.clone());
    log.info(&format!("found {} broken symlinks:", broken.len()));
    for symlink in &broken {
        if let Ok(raw) = std::fs::read_link(symlink) {
            let shown = symlink.strip_prefix(&target_root).unwrap_or(symlink);
            log.info(&format!(
                "  \x1b[31m✗\x1b[0m {} -> {}",
                shown.display(),
                raw.display()
            ));
        }
    }
    log.info("run 'dotlink check' to remove them");
    Ok(())
}
