//! Domain-specific error types for the symlink manager.
//!
//! Internal modules return typed errors ([`ConfigError`], [`PathError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! Only errors that indicate a broken invocation (wrong layer name, bad
//! configuration) surface here. Per-item filesystem failures during bulk
//! operations are logged and swallowed at the item granularity so the
//! overall operation can complete with an accurate partial count.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from configuration loading and layer resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named layer has no directory under `platforms/`.
    #[error("layer directory does not exist: {layer} (looked in {platforms_dir})")]
    MissingLayer {
        /// The layer name as given on the command line.
        layer: String,
        /// The `platforms/` root that was searched.
        platforms_dir: String,
    },

    /// An exclusion pattern contains an invalid glob.
    #[error("invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// Parse error detail from the glob engine.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file contains a syntax error that prevents parsing.
    #[error("invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path to the unparseable file.
        file: String,
        /// Parse error detail.
        message: String,
    },
}

/// Errors that arise from relative-path computation.
#[derive(Error, Debug)]
pub enum PathError {
    /// Relative link computation requires absolute inputs.
    #[error("path is not absolute: {0}")]
    NotAbsolute(PathBuf),

    /// The link target has no parent directory to resolve against.
    #[error("path has no parent directory: {0}")]
    NoParent(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_missing_layer_display() {
        let e = ConfigError::MissingLayer {
            layer: "plan9".to_string(),
            platforms_dir: "/home/u/dotfiles/platforms".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "layer directory does not exist: plan9 (looked in /home/u/dotfiles/platforms)"
        );
    }

    #[test]
    fn config_error_invalid_pattern_display() {
        let e = ConfigError::InvalidPattern {
            pattern: "[".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert!(e.to_string().contains("invalid exclusion pattern '['"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as _;
        let e = ConfigError::Io {
            path: "/conf/config.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/conf/config.toml"));
    }

    #[test]
    fn path_error_not_absolute_display() {
        let e = PathError::NotAbsolute(PathBuf::from("relative/path"));
        assert_eq!(e.to_string(), "path is not absolute: relative/path");
    }

    #[test]
    fn path_error_no_parent_display() {
        let e = PathError::NoParent(PathBuf::from("/"));
        assert_eq!(e.to_string(), "path has no parent directory: /");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PathError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _a: anyhow::Error = ConfigError::MissingLayer {
            layer: "x".to_string(),
            platforms_dir: "/p".to_string(),
        }
        .into();
        let _b: anyhow::Error = PathError::NotAbsolute(PathBuf::from("x")).into();
    }
}
