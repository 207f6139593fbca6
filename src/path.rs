//! Relative link computation and broken-symlink resolution.
//!
//! Links created by the manager always carry *relative* targets so that the
//! dotfiles repository and the target tree can be relocated together without
//! breaking every link. Broken-symlink resolution works purely on the raw
//! link text and never requires the resolved path to exist.

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Calculate the relative path stored in a symlink at `target` so that it
/// resolves to `source`.
///
/// The result is relative to `target`'s parent directory and may ascend past
/// the common ancestor with `..` segments.
///
/// # Errors
///
/// Returns an error if either path is not absolute, or if `target` has no
/// parent directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotlink::path::make_relative_symlink;
///
/// let link = make_relative_symlink(
///     Path::new("/home/u/dotfiles/common/.config/nvim/init.lua"),
///     Path::new("/home/u/.config/nvim/init.lua"),
/// )
/// .unwrap();
/// assert_eq!(
///     link,
///     Path::new("../../dotfiles/common/.config/nvim/init.lua")
/// );
/// ```
pub fn make_relative_symlink(source: &Path, target: &Path) -> Result<PathBuf, PathError> {
    if !source.is_absolute() {
        return Err(PathError::NotAbsolute(source.to_path_buf()));
    }
    if !target.is_absolute() {
        return Err(PathError::NotAbsolute(target.to_path_buf()));
    }
    let base = target
        .parent()
        .ok_or_else(|| PathError::NoParent(target.to_path_buf()))?;
    Ok(relative_from(source, base))
}

/// Relative path from `base` to `path`, both absolute, ascending with `..`
/// where the two diverge.
fn relative_from(path: &Path, base: &Path) -> PathBuf {
    let mut path_comps = path.components().peekable();
    let mut base_comps = base.components().peekable();

    // Drop the shared ancestor prefix.
    while let (Some(p), Some(b)) = (path_comps.peek(), base_comps.peek()) {
        if p != b {
            break;
        }
        path_comps.next();
        base_comps.next();
    }

    let mut rel = PathBuf::new();
    for _ in base_comps {
        rel.push("..");
    }
    for comp in path_comps {
        rel.push(comp.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// Resolve the target a symlink points to, whether or not that target
/// exists on disk.
///
/// Returns `None` if `symlink` is not a symlink or its link text cannot be
/// read. Absolute link text is returned unchanged; relative link text is
/// resolved against the symlink's own parent directory with lexical
/// `.`/`..` normalization.
#[must_use]
pub fn resolve_broken_symlink(symlink: &Path) -> Option<PathBuf> {
    let meta = std::fs::symlink_metadata(symlink).ok()?;
    if !meta.file_type().is_symlink() {
        return None;
    }

    let text = std::fs::read_link(symlink).ok()?;
    if text.is_absolute() {
        return Some(text);
    }

    let parent = symlink.parent()?;
    Some(normalize_lexically(&parent.join(text)))
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root; `..` that cannot be cancelled against
/// a preceding normal segment is kept (only possible for relative inputs).
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(c) => out.push(c),
        }
    }
    out
}
