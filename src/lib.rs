//! Layered dotfiles symlink manager.
//!
//! Dotfiles live in a repository with a `platforms/` directory holding a
//! `common` base layer plus one overlay per platform (`macos`, `wsl`,
//! `arch`, ...). Each layer mirrors the target root, and linking a layer
//! creates relative symlinks from the target tree back into the repository,
//! overlay entries overwriting base entries. An `apps/` directory holds
//! per-platform executables linked into `{target}/.local/bin/`.
//!
//! The filesystem is the only source of truth: every operation scans it
//! fresh, nothing is cached between invocations, and operations are safe to
//! rerun.

pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod manager;
pub mod path;
pub mod walker;
