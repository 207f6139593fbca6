//! Symlink lifecycle orchestration over layered configuration directories.
//!
//! A layer is a directory under `platforms/` (the `common` base plus one
//! platform overlay) whose tree mirrors the desired layout under the target
//! root. Every operation performs a fresh filesystem scan — the filesystem
//! is the only source of truth, and nothing is cached between invocations.
//!
//! Per-item filesystem failures during bulk operations are logged and
//! skipped so a single unwritable file never aborts the rest of the run.

use std::path::{Path, PathBuf};

use crate::cleanup::cleanup_empty_directories;
use crate::config::Settings;
use crate::error::ConfigError;
use crate::exclude::ExcludeMatcher;
use crate::logging::Logger;
use crate::path::{make_relative_symlink, resolve_broken_symlink};
use crate::walker::{SymlinkWalker, walk_entries};

/// Manages dotfiles symlinks with a layered architecture.
pub struct SymlinkManager<'a> {
    settings: &'a Settings,
    log: &'a Logger,
    dry_run: bool,
    matcher: ExcludeMatcher,
    walker: SymlinkWalker,
    dotfiles_dir: PathBuf,
    target_dir: PathBuf,
}

impl<'a> SymlinkManager<'a> {
    /// Build a manager from resolved settings.
    ///
    /// Canonicalizes the dotfiles and target roots so that membership
    /// comparisons against resolved link targets are stable.
    ///
    /// # Errors
    ///
    /// Returns an error if either root does not exist or an exclusion
    /// pattern is invalid.
    pub fn new(settings: &'a Settings, log: &'a Logger, dry_run: bool) -> Result<Self, ConfigError> {
        let matcher = ExcludeMatcher::new(&settings.exclude_patterns)?;
        let walker = SymlinkWalker::new(settings.search_depth, &settings.exclude_search_dirs);
        let dotfiles_dir = canonicalize(&settings.dotfiles_dir)?;
        let target_dir = canonicalize(&settings.target_dir)?;

        Ok(Self {
            settings,
            log,
            dry_run,
            matcher,
            walker,
            dotfiles_dir,
            target_dir,
        })
    }

    /// Create symlinks for every non-excluded file in `source_dir`.
    ///
    /// Anything already occupying a target path is removed first (last
    /// writer wins, no backup). Returns the number of links created;
    /// per-file errors are warned and skipped.
    pub fn create_symlinks(&self, source_dir: &Path, layer: &str) -> usize {
        if !source_dir.exists() {
            self.log.warn(&format!(
                "source directory does not exist: {}",
                source_dir.display()
            ));
            return 0;
        }

        self.log.stage(&format!("Creating {layer} symlinks"));
        let Ok(source_dir) = canonicalize(source_dir) else {
            return 0;
        };
        let mut count = 0;

        for item in walk_entries(&source_dir) {
            let Ok(relative_path) = item.strip_prefix(&source_dir) else {
                continue;
            };
            if self.matcher.should_exclude(relative_path) {
                continue;
            }

            let target_path = self.target_dir.join(relative_path);
            match self.link_one(&item, &target_path) {
                Ok(link_value) => {
                    if self.dry_run {
                        self.log.dry_run(&format!(
                            "would link {} -> {}",
                            relative_path.display(),
                            link_value.display()
                        ));
                    } else {
                        self.log.info(&format!(
                            "\x1b[32m✓\x1b[0m {} -> {}",
                            relative_path.display(),
                            link_value.display()
                        ));
                    }
                    count += 1;
                }
                Err(e) => {
                    self.log.warn(&format!(
                        "failed to link {}: {e:#}",
                        relative_path.display()
                    ));
                }
            }
        }

        self.log.info(&format!("created {count} symlinks"));
        count
    }

    /// Replace whatever is at `target_path` with a relative symlink to `source`.
    fn link_one(&self, source: &Path, target_path: &Path) -> anyhow::Result<PathBuf> {
        let link_value = make_relative_symlink(source, target_path)?;

        if self.dry_run {
            return Ok(link_value);
        }

        if let Some(parent) = target_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Remove existing target unconditionally: overwrite semantics.
        if target_path.exists() || std::fs::symlink_metadata(target_path).is_ok() {
            remove_existing(target_path)?;
        }

        create_symlink(&link_value, target_path)?;
        Ok(link_value)
    }

    /// Remove every symlink under the target root that resolves into
    /// `source_dir`, then sweep empty directories. Returns the removed count.
    pub fn remove_symlinks(&self, source_dir: &Path, layer: &str) -> usize {
        self.log.stage(&format!("Removing {layer} symlinks"));
        let source_dir = canonicalize(source_dir).unwrap_or_else(|_| source_dir.to_path_buf());
        let mut count = 0;

        for symlink in self.walker.find_symlinks(&self.target_dir) {
            let Some(target) = self.resolve_any(&symlink) else {
                continue;
            };
            // Strict component-wise containment, not raw string prefix.
            if !target.starts_with(&source_dir) {
                continue;
            }

            let shown = display_relative(&symlink, &self.target_dir);
            if self.dry_run {
                self.log.dry_run(&format!("would remove {shown}"));
                count += 1;
                continue;
            }
            match std::fs::remove_file(&symlink) {
                Ok(()) => {
                    self.log.info(&format!("\x1b[32m✓\x1b[0m removed {shown}"));
                    count += 1;
                }
                Err(e) => {
                    self.log.warn(&format!("failed to remove {shown}: {e}"));
                }
            }
        }

        if !self.dry_run {
            self.cleanup_after_removal();
        }
        self.log.info(&format!("removed {count} symlinks"));
        count
    }

    /// Find broken symlinks under the target root that point into the
    /// dotfiles repository. Unrelated broken links elsewhere are ignored.
    #[must_use]
    pub fn find_broken_symlinks(&self) -> Vec<PathBuf> {
        let mut broken = Vec::new();

        for symlink in self.walker.find_symlinks(&self.target_dir) {
            if symlink.exists() {
                continue;
            }
            if let Some(target) = resolve_broken_symlink(&symlink) {
                if target.starts_with(&self.dotfiles_dir) {
                    broken.push(symlink);
                }
            }
        }

        broken
    }

    /// Find and remove broken symlinks, then sweep empty directories.
    ///
    /// Individual unlink failures reduce the returned count but never abort.
    pub fn check_and_clean(&self) -> usize {
        self.log.stage("Scanning for broken symlinks");

        let broken = self.find_broken_symlinks();
        if broken.is_empty() {
            self.log.info("no broken symlinks found");
            return 0;
        }

        self.log
            .info(&format!("found {} broken symlinks:", broken.len()));
        for symlink in &broken {
            if let Ok(raw) = std::fs::read_link(symlink) {
                self.log.info(&format!(
                    "  \x1b[31m✗\x1b[0m {} -> {}",
                    display_relative(symlink, &self.target_dir),
                    raw.display()
                ));
            }
        }

        let mut count = 0;
        for symlink in &broken {
            if self.dry_run {
                self.log.dry_run(&format!(
                    "would remove {}",
                    display_relative(symlink, &self.target_dir)
                ));
                count += 1;
            } else if std::fs::remove_file(symlink).is_ok() {
                count += 1;
            }
        }

        if !self.dry_run {
            self.cleanup_after_removal();
        }
        self.log.info(&format!("removed {count} broken symlinks"));
        count
    }

    /// List symlinks whose resolved target falls under `source_dir` (or
    /// anywhere in the dotfiles repository when `None`). Read-only.
    pub fn show_symlinks(&self, source_dir: Option<&Path>, layer: &str) -> usize {
        self.log.stage(&format!("Symlinks for {layer}"));

        let filter = source_dir.map_or_else(
            || self.dotfiles_dir.clone(),
            |d| canonicalize(d).unwrap_or_else(|_| d.to_path_buf()),
        );
        let mut count = 0;
        let mut broken_count = 0;

        for symlink in self.walker.find_symlinks(&self.target_dir) {
            let Some(target) = self.resolve_any(&symlink) else {
                continue;
            };
            if !target.starts_with(&filter) {
                continue;
            }
            let Ok(raw) = std::fs::read_link(&symlink) else {
                continue;
            };

            let shown = display_relative(&symlink, &self.target_dir);
            if symlink.exists() {
                self.log
                    .info(&format!("\x1b[32m->\x1b[0m {shown} -> {}", raw.display()));
            } else {
                self.log.info(&format!(
                    "\x1b[31m✗\x1b[0m {shown} -> {} (BROKEN)",
                    raw.display()
                ));
                broken_count += 1;
            }
            count += 1;
        }

        if count == 0 {
            self.log.info("no symlinks found");
        } else if broken_count > 0 {
            self.log
                .info(&format!("found {count} symlinks ({broken_count} broken)"));
        } else {
            self.log.info(&format!("found {count} symlinks"));
        }
        count
    }

    /// Link executables from `apps/{platform}/` into `{target}/.local/bin/`.
    ///
    /// A subdirectory containing its own `bin/` folder has that folder's
    /// files linked; other subdirectories are skipped (multi-file tools
    /// needing a build step).
    pub fn link_apps(&self, platform: &str) -> usize {
        let apps_dir = self.settings.apps_dir(platform);
        if !apps_dir.exists() {
            return 0;
        }
        let Ok(apps_dir) = canonicalize(&apps_dir) else {
            return 0;
        };

        self.log
            .stage(&format!("Linking {platform} apps to ~/.local/bin"));
        let target_bin = self.target_dir.join(".local").join("bin");
        if !self.dry_run {
            if let Err(e) = std::fs::create_dir_all(&target_bin) {
                self.log
                    .warn(&format!("cannot create {}: {e}", target_bin.display()));
                return 0;
            }
        }

        let mut count = 0;
        let Ok(entries) = std::fs::read_dir(&apps_dir) else {
            return 0;
        };
        for entry in entries.flatten() {
            let app = entry.path();
            if app.is_dir() {
                // Tools shipping their own bin/ get that folder's contents
                // linked; anything else is a build-required tool, skipped.
                let bin_dir = app.join("bin");
                if bin_dir.is_dir() {
                    count += self.link_bin_contents(&bin_dir, &target_bin);
                }
                continue;
            }
            count += usize::from(self.link_app_entry(&app, &target_bin));
        }

        if count > 0 {
            self.log.info(&format!("linked {count} apps"));
        }
        count
    }

    /// Link every regular file in a tool's `bin/` directory.
    fn link_bin_contents(&self, bin_dir: &Path, target_bin: &Path) -> usize {
        let mut count = 0;
        let Ok(entries) = std::fs::read_dir(bin_dir) else {
            return 0;
        };
        for entry in entries.flatten() {
            let executable = entry.path();
            if executable.is_file() {
                count += usize::from(self.link_app_entry(&executable, target_bin));
            }
        }
        count
    }

    /// Link a single executable into the target bin directory.
    fn link_app_entry(&self, executable: &Path, target_bin: &Path) -> bool {
        let Some(name) = executable.file_name() else {
            return false;
        };
        if self.matcher.should_exclude(Path::new(name)) {
            return false;
        }

        let target = target_bin.join(name);
        match self.link_one(executable, &target) {
            Ok(_) => {
                let msg = format!(
                    "{} -> ~/.local/bin/{}",
                    executable.display(),
                    name.to_string_lossy()
                );
                if self.dry_run {
                    self.log.dry_run(&format!("would link {msg}"));
                } else {
                    self.log.info(&format!("\x1b[32m✓\x1b[0m {msg}"));
                }
                true
            }
            Err(e) => {
                self.log
                    .warn(&format!("failed to link {}: {e:#}", executable.display()));
                false
            }
        }
    }

    /// Complete refresh for a platform: remove both layers, clean broken
    /// links, recreate common then the platform overlay, relink apps.
    ///
    /// Every step is best-effort; a partial failure in one step never stops
    /// the following steps.
    pub fn relink(&self, platform: &str) {
        let platform_dir = self.settings.layer_dir(platform);
        let common_dir = self.settings.layer_dir("common");

        self.log.stage(&format!("Complete relink for {platform}"));

        self.log.info("step 1/6: removing platform symlinks");
        self.remove_symlinks(&platform_dir, platform);

        self.log.info("step 2/6: removing common symlinks");
        self.remove_symlinks(&common_dir, "common");

        self.log.info("step 3/6: checking for broken symlinks");
        self.check_and_clean();

        self.log.info("step 4/6: creating common base layer");
        self.create_symlinks(&common_dir, "common");

        self.log.info("step 5/6: creating platform overlay");
        self.create_symlinks(&platform_dir, platform);

        self.log.info("step 6/6: linking apps");
        self.link_apps("common");
        self.link_apps(platform);

        self.log
            .stage(&format!("Relink complete: {platform} environment refreshed"));
    }

    /// Resolve a symlink whether live or broken: live links are fully
    /// canonicalized, broken ones resolved lexically from their link text.
    fn resolve_any(&self, symlink: &Path) -> Option<PathBuf> {
        if symlink.exists() {
            std::fs::canonicalize(symlink).ok()
        } else {
            resolve_broken_symlink(symlink)
        }
    }

    /// Sweep the configured cleanup roots and report what was removed.
    fn cleanup_after_removal(&self) {
        let removed = cleanup_empty_directories(
            &self.target_dir,
            &self.settings.cleanup_paths(),
            &self.settings.protected_dirs,
        );
        if !removed.is_empty() {
            self.log
                .info(&format!("cleaned up {} empty directories:", removed.len()));
            for dir in removed {
                self.log.debug(&format!("  - {}", dir.display()));
            }
        }
    }
}

/// Canonicalize a root, wrapping the error with the offending path.
fn canonicalize(path: &Path) -> Result<PathBuf, ConfigError> {
    std::fs::canonicalize(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Path shown to the user: relative to the target root when possible.
fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Remove whatever currently occupies `path`. Regular files and symlinks
/// are unlinked; a real directory is removed only when empty, so a
/// populated directory in the way surfaces as an error on that item.
fn remove_existing(path: &Path) -> std::io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.is_dir() && !meta.file_type().is_symlink() {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Create a symlink at `link` whose stored text is `value` (platform-specific).
fn create_symlink(value: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(value, link)
    }

    #[cfg(windows)]
    {
        // The stored value is relative; resolve it to decide file vs dir.
        let resolved = link
            .parent()
            .map_or_else(|| value.to_path_buf(), |p| p.join(value));
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(value, link)
        } else {
            std::os::windows::fs::symlink_file(value, link)
        }
    }
}
