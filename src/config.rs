//! Settings for the symlink manager.
//!
//! All configuration is resolved once at program start into an explicit
//! [`Settings`] struct and passed by reference into every component — there
//! is no ambient global state. Resolution order: built-in defaults, then an
//! optional TOML file at `$XDG_CONFIG_HOME/dotlink/config.toml`, then
//! environment variables (`DOTFILES`, `DOTLINK_TARGET_DIR`,
//! `DOTLINK_SEARCH_DEPTH`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Resolved configuration, read once per invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory of the dotfiles repository.
    pub dotfiles_dir: PathBuf,
    /// Target directory for symlinks (usually `$HOME`).
    pub target_dir: PathBuf,
    /// Maximum depth for finding symlinks under the target root.
    pub search_depth: usize,
    /// Directories (relative to `target_dir`) swept for empty subdirectories
    /// after removal operations.
    pub cleanup_dirs: Vec<String>,
    /// File patterns excluded from symlinking (directory-boundary, glob,
    /// and exact-name rules).
    pub exclude_patterns: Vec<String>,
    /// Directory name fragments pruned from target-side symlink searches
    /// (platform caches, package-manager state, VCS internals, build
    /// artifacts, IDE directories).
    pub exclude_search_dirs: Vec<String>,
    /// Directories (relative to `target_dir`) that are never removed even
    /// when empty.
    pub protected_dirs: Vec<String>,
}

/// Optional overrides loaded from `config.toml`. Any field left out keeps
/// its default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Overrides {
    dotfiles_dir: Option<PathBuf>,
    target_dir: Option<PathBuf>,
    search_depth: Option<usize>,
    cleanup_dirs: Option<Vec<String>>,
    exclude_patterns: Option<Vec<String>>,
    exclude_search_dirs: Option<Vec<String>>,
    protected_dirs: Option<Vec<String>>,
}

fn default_exclude_patterns() -> Vec<String> {
    [
        "tmux/plugins/",
        ".tmux/plugins/",
        ".git/",
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        "*.tmp",
        "*.temp",
        "*.log",
        "*.cache",
        "*.swap",
        "*.swp",
        "*~",
        "node_modules/",
        ".venv/",
        "__pycache__/",
        "*.pyc",
        ".pytest_cache/",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_exclude_search_dirs() -> Vec<String> {
    [
        // macOS specific
        "Library/",
        ".Trash/",
        "Applications/",
        "Movies/",
        "Music/",
        "Pictures/",
        "Downloads/",
        // Linux/WSL specific
        ".cache/",
        ".local/share/Trash/",
        "snap/",
        // Language package managers and toolchains
        "node_modules/",
        ".npm/",
        ".nvm/",
        ".pyenv/",
        ".cargo/",
        ".rustup/",
        ".rbenv/",
        // Version control
        ".git/",
        // Virtual environments and build artifacts
        "venv/",
        ".venv/",
        "env/",
        "__pycache__/",
        ".pytest_cache/",
        ".mypy_cache/",
        ".ruff_cache/",
        "vendor/",
        ".bundle/",
        "target/",
        "dist/",
        "build/",
        // IDE and editor directories
        ".idea/",
        ".vscode/",
        ".vim/",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_protected_dirs() -> Vec<String> {
    [
        ".local/state/claude",
        ".local/state/claude/locks",
        ".local/state/nvim",
        ".local/share/nvim",
        ".cache",
        ".venv",
        ".git",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Path of the optional override file.
fn config_file_path() -> Option<PathBuf> {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
    Some(config_dir.join("dotlink").join("config.toml"))
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            dotfiles_dir: home.join("dotfiles"),
            target_dir: home,
            search_depth: 5,
            cleanup_dirs: vec![
                ".config".to_string(),
                ".local/shell".to_string(),
                ".local/share/workflows".to_string(),
            ],
            exclude_patterns: default_exclude_patterns(),
            exclude_search_dirs: default_exclude_search_dirs(),
            protected_dirs: default_protected_dirs(),
        }
    }
}

impl Settings {
    /// Resolve settings from defaults, the optional config file, and
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(path) = config_file_path() {
            if path.exists() {
                settings.apply(load_overrides(&path)?);
            }
        }

        settings.apply_env();
        Ok(settings)
    }

    /// Overlay values from a parsed config file.
    fn apply(&mut self, o: Overrides) {
        if let Some(v) = o.dotfiles_dir {
            self.dotfiles_dir = v;
        }
        if let Some(v) = o.target_dir {
            self.target_dir = v;
        }
        if let Some(v) = o.search_depth {
            self.search_depth = v;
        }
        if let Some(v) = o.cleanup_dirs {
            self.cleanup_dirs = v;
        }
        if let Some(v) = o.exclude_patterns {
            self.exclude_patterns = v;
        }
        if let Some(v) = o.exclude_search_dirs {
            self.exclude_search_dirs = v;
        }
        if let Some(v) = o.protected_dirs {
            self.protected_dirs = v;
        }
    }

    /// Overlay values from environment variables. Env wins over the file.
    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("DOTFILES") {
            if !v.is_empty() {
                self.dotfiles_dir = PathBuf::from(v);
            }
        }
        if let Ok(v) = std::env::var("DOTLINK_TARGET_DIR") {
            if !v.is_empty() {
                self.target_dir = PathBuf::from(v);
            }
        }
        if let Ok(v) = std::env::var("DOTLINK_SEARCH_DEPTH") {
            if let Ok(depth) = v.parse() {
                self.search_depth = depth;
            }
        }
    }

    /// The `platforms/` root containing layer directories.
    #[must_use]
    pub fn platforms_dir(&self) -> PathBuf {
        self.dotfiles_dir.join("platforms")
    }

    /// The source directory for a named layer.
    #[must_use]
    pub fn layer_dir(&self, layer: &str) -> PathBuf {
        self.platforms_dir().join(layer)
    }

    /// The executables source directory for a platform.
    #[must_use]
    pub fn apps_dir(&self, platform: &str) -> PathBuf {
        self.dotfiles_dir.join("apps").join(platform)
    }

    /// Absolute paths of the configured cleanup roots.
    #[must_use]
    pub fn cleanup_paths(&self) -> Vec<PathBuf> {
        self.cleanup_dirs
            .iter()
            .map(|d| self.target_dir.join(d))
            .collect()
    }
}

/// Parse the override file.
fn load_overrides(path: &Path) -> Result<Overrides, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_home() {
        let s = Settings::default();
        assert_eq!(s.search_depth, 5);
        assert_eq!(s.dotfiles_dir, s.target_dir.join("dotfiles"));
    }

    #[test]
    fn default_patterns_include_git_dir_rule() {
        let s = Settings::default();
        assert!(s.exclude_patterns.iter().any(|p| p == ".git/"));
        assert!(s.exclude_patterns.iter().any(|p| p == "*.tmp"));
    }

    #[test]
    fn layer_dir_joins_platforms() {
        let s = Settings {
            dotfiles_dir: PathBuf::from("/df"),
            ..Settings::default()
        };
        assert_eq!(s.layer_dir("macos"), PathBuf::from("/df/platforms/macos"));
        assert_eq!(s.apps_dir("common"), PathBuf::from("/df/apps/common"));
    }

    #[test]
    fn cleanup_paths_are_absolute_under_target() {
        let s = Settings {
            target_dir: PathBuf::from("/home/u"),
            cleanup_dirs: vec![".config".to_string(), ".local/shell".to_string()],
            ..Settings::default()
        };
        assert_eq!(
            s.cleanup_paths(),
            vec![
                PathBuf::from("/home/u/.config"),
                PathBuf::from("/home/u/.local/shell")
            ]
        );
    }

    #[test]
    fn overrides_overlay_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(
            &file,
            "search_depth = 9\ncleanup_dirs = [\".config\"]\n",
        )
        .unwrap();

        let mut s = Settings::default();
        let defaults_patterns = s.exclude_patterns.clone();
        s.apply(load_overrides(&file).unwrap());

        assert_eq!(s.search_depth, 9);
        assert_eq!(s.cleanup_dirs, vec![".config".to_string()]);
        // Untouched fields keep their defaults.
        assert_eq!(s.exclude_patterns, defaults_patterns);
    }

    #[test]
    fn overrides_reject_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "no_such_field = 1\n").unwrap();
        assert!(matches!(
            load_overrides(&file),
            Err(ConfigError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn overrides_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nope.toml");
        assert!(matches!(
            load_overrides(&file),
            Err(ConfigError::Io { .. })
        ));
    }
}
