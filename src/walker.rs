//! Directory traversal for symlink discovery.
//!
//! Two walks live here with deliberately different rules:
//!
//! - [`SymlinkWalker::find_symlinks`] scans the *target* tree (a home
//!   directory of unknown size), so it is depth-bounded, prunes excluded
//!   directories before descending, and never enters a symlinked directory.
//! - [`walk_entries`] scans a *source* layer (the trusted, repository-sized
//!   dotfiles tree), so it is unbounded but still refuses to enter
//!   symlinked directories.
//!
//! Both walks are best-effort: a subdirectory that cannot be read is
//! skipped and the walk continues elsewhere.

use std::path::{Path, PathBuf};

/// Depth-bounded target-tree walker with pre-descent pruning.
#[derive(Debug, Clone)]
pub struct SymlinkWalker {
    max_depth: usize,
    exclude_fragments: Vec<String>,
}

impl SymlinkWalker {
    /// Build a walker from the configured depth limit and excluded-directory
    /// fragments (trailing slashes are stripped once here).
    #[must_use]
    pub fn new(max_depth: usize, exclude_search_dirs: &[String]) -> Self {
        Self {
            max_depth,
            exclude_fragments: exclude_search_dirs
                .iter()
                .map(|p| p.trim_end_matches('/').to_string())
                .collect(),
        }
    }

    /// Whether a directory should be pruned from the search.
    fn is_excluded_dir(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude_fragments
            .iter()
            .any(|fragment| path_str.contains(fragment.as_str()))
    }

    /// Find every symlink under `root`, up to the configured depth.
    ///
    /// Uses an explicit work stack rather than recursion. Excluded
    /// directories are pruned before any descent; symlinked directories are
    /// reported but never entered, which guarantees termination even with
    /// circular links. Unreadable directories are skipped silently.
    #[must_use]
    pub fn find_symlinks(&self, root: &Path) -> Vec<PathBuf> {
        let mut symlinks = Vec::new();
        let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];

        while let Some((dir, depth)) = stack.pop() {
            if depth >= self.max_depth {
                continue;
            }
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let Ok(meta) = std::fs::symlink_metadata(&path) else {
                    continue;
                };
                let is_symlink = meta.file_type().is_symlink();

                if is_symlink {
                    symlinks.push(path.clone());
                    // Never traverse through a symlinked directory.
                    continue;
                }

                if meta.is_dir() {
                    // Prune before descending, not after.
                    if self.is_excluded_dir(&path) {
                        continue;
                    }
                    stack.push((path, depth + 1));
                }
            }
        }

        symlinks
    }
}

/// Recursively collect every regular file and symlink under `source_dir`.
///
/// Symlinks are reported as entries in their own right (a symlinked
/// directory in the source becomes a linkable entry, not a subtree to
/// enter). Unreadable subdirectories are skipped.
#[must_use]
pub fn walk_entries(source_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack: Vec<PathBuf> = vec![source_dir.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(meta) = std::fs::symlink_metadata(&path) else {
                continue;
            };
            if meta.file_type().is_symlink() || meta.is_file() {
                files.push(path);
            } else if meta.is_dir() {
                stack.push(path);
            }
        }
    }

    files
}
