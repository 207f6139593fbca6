//! Exclusion-pattern matching for symlink candidates.
//!
//! Patterns come in three shapes, distinguished once at parse time rather
//! than re-sniffed on every match:
//!
//! - `"X/"` — directory boundary: excludes any path containing `X` as a
//!   complete path segment (so `.git/` matches `.git/config` and
//!   `foo/.git/hooks` but never `.gitconfig`).
//! - patterns containing `*` — shell glob, matched against the filename
//!   component only.
//! - anything else — exact filename match.
//!
//! Rules are evaluated in configured order; the first match wins. Matching
//! is a pure function of the path string — it never consults the filesystem.

use std::path::Path;

use crate::error::ConfigError;

/// A single parsed exclusion rule.
#[derive(Debug, Clone)]
pub enum ExcludeRule {
    /// Pattern ended with `/`: match the named directory as a full path
    /// segment anywhere in the path.
    DirBoundary(String),
    /// Pattern contained a wildcard: glob-match the filename component.
    Glob(glob::Pattern),
    /// Exact equality with the filename component.
    ExactName(String),
}

impl ExcludeRule {
    /// Parse a pattern string into its rule shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a wildcard pattern is not a valid glob.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if let Some(dir) = pattern.strip_suffix('/') {
            return Ok(Self::DirBoundary(dir.to_string()));
        }
        if pattern.contains('*') {
            let compiled = glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            return Ok(Self::Glob(compiled));
        }
        Ok(Self::ExactName(pattern.to_string()))
    }

    /// Whether this rule matches the given relative path.
    fn matches(&self, path_str: &str, filename: &str) -> bool {
        match self {
            Self::DirBoundary(dir) => {
                let inner = format!("/{dir}/");
                let prefix = format!("{dir}/");
                path_str.contains(&inner) || path_str.starts_with(&prefix)
            }
            Self::Glob(pattern) => pattern.matches(filename),
            Self::ExactName(name) => filename == name,
        }
    }
}

/// An ordered rule list compiled from configured pattern strings.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    rules: Vec<ExcludeRule>,
}

impl ExcludeMatcher {
    /// Compile the given patterns, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error on the first invalid glob pattern; a bad exclusion
    /// list is a fatal configuration error, not something to skip silently.
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let rules = patterns
            .iter()
            .map(|p| ExcludeRule::parse(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Whether the given path (relative to its layer root) is excluded
    /// from symlinking. First matching rule wins.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.rules
            .iter()
            .any(|rule| rule.matches(&path_str, &filename))
    }
}
