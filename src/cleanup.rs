//! Post-removal sweep of empty directories.

use std::path::{Path, PathBuf};

/// Remove empty directories under the configured cleanup roots.
///
/// Directories are visited deepest-first so that a directory's children are
/// evaluated (and possibly removed) before the directory itself, letting a
/// whole empty chain collapse in one pass. A directory is removed only when
/// it is currently empty and its path relative to `base` does not match or
/// fall under any entry in `protected`. Removal failures are swallowed
/// per-directory.
///
/// Returns the removed directories as paths relative to `base` (or absolute
/// when a directory lies outside `base`).
#[must_use]
pub fn cleanup_empty_directories(
    base: &Path,
    cleanup_roots: &[PathBuf],
    protected: &[String],
) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    for root in cleanup_roots {
        if !root.exists() {
            continue;
        }

        let mut dirs = collect_dirs(root);
        // Deepest first.
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

        for dir in dirs {
            if !is_empty_dir(&dir) {
                continue;
            }
            if let Ok(relative) = dir.strip_prefix(base) {
                if is_protected(relative, protected) {
                    continue;
                }
            }
            if std::fs::remove_dir(&dir).is_ok() {
                let reported = dir
                    .strip_prefix(base)
                    .map_or_else(|_| dir.clone(), Path::to_path_buf);
                removed.push(reported);
            }
        }
    }

    removed
}

/// All directories under `root` (excluding `root` itself), never entering
/// symlinked directories.
fn collect_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(meta) = std::fs::symlink_metadata(&path) else {
                continue;
            };
            if meta.is_dir() && !meta.file_type().is_symlink() {
                dirs.push(path.clone());
                stack.push(path);
            }
        }
    }

    dirs
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none())
}

/// Whether `relative` equals or falls under any protected entry.
fn is_protected(relative: &Path, protected: &[String]) -> bool {
    protected
        .iter()
        .any(|p| relative.starts_with(Path::new(p)))
}
