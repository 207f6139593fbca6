//! Shared fixture for integration tests.
//!
//! Builds a throwaway dotfiles repository (`platforms/` layers plus an
//! `apps/` tree) and a throwaway target directory, wired together through a
//! [`Settings`] value so tests exercise the real manager against real
//! filesystem state.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotlink::config::Settings;
use dotlink::logging::Logger;
use dotlink::manager::SymlinkManager;

pub struct TestContext {
    dotfiles: tempfile::TempDir,
    target: tempfile::TempDir,
    pub settings: Settings,
    pub log: Logger,
}

impl TestContext {
    /// A fresh repository with an empty `common` layer and an empty target.
    pub fn new() -> Self {
        let dotfiles = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dotfiles.path().join("platforms/common")).unwrap();

        let settings = Settings {
            dotfiles_dir: std::fs::canonicalize(dotfiles.path()).unwrap(),
            target_dir: std::fs::canonicalize(target.path()).unwrap(),
            ..Settings::default()
        };
        let log = Logger::named(false, "test-integration");

        Self {
            dotfiles,
            target,
            settings,
            log,
        }
    }

    pub fn manager(&self) -> SymlinkManager<'_> {
        SymlinkManager::new(&self.settings, &self.log, false).unwrap()
    }

    pub fn dry_run_manager(&self) -> SymlinkManager<'_> {
        SymlinkManager::new(&self.settings, &self.log, true).unwrap()
    }

    /// Write a file into a layer, creating the layer and parents as needed.
    pub fn add_layer_file(&self, layer: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.settings.layer_dir(layer).join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Write a standalone executable into `apps/{platform}/`.
    pub fn add_app(&self, platform: &str, name: &str) -> PathBuf {
        let path = self.settings.apps_dir(platform).join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        path
    }

    /// Write an executable inside a tool's `bin/` directory under
    /// `apps/{platform}/{tool}/bin/`.
    pub fn add_app_bin(&self, platform: &str, tool: &str, name: &str) -> PathBuf {
        let path = self
            .settings
            .apps_dir(platform)
            .join(tool)
            .join("bin")
            .join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        path
    }

    pub fn layer_dir(&self, layer: &str) -> PathBuf {
        self.settings.layer_dir(layer)
    }

    pub fn target_path(&self, relative: &str) -> PathBuf {
        self.settings.target_dir.join(relative)
    }

    /// Whether the target path is a symlink (live or broken).
    pub fn is_symlink(&self, relative: &str) -> bool {
        std::fs::symlink_metadata(self.target_path(relative))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// The layer file a live target symlink ultimately resolves to.
    pub fn resolved_target(&self, relative: &str) -> PathBuf {
        std::fs::canonicalize(self.target_path(relative)).unwrap()
    }
}

/// Create a symlink in the target tree by hand (for states the manager
/// itself would not produce).
pub fn raw_symlink(target: &Path, link: &Path) {
    std::fs::create_dir_all(link.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink(target, link).unwrap();
}
