//! Command-line interface definition.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Version string baked in at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTLINK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")))
}

/// Layered dotfiles symlink manager.
#[derive(Debug, Parser)]
#[command(
    name = "dotlink",
    about = "Manage dotfiles symlinks with a common base layer and platform overlays",
    version = version()
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Show detailed output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without touching the filesystem.
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create symlinks for a layer and link its apps.
    Link {
        /// Layer to link (common, macos, wsl, arch, ...).
        layer: String,
    },

    /// Remove the symlinks belonging to a layer.
    Unlink {
        /// Layer to unlink.
        layer: String,
    },

    /// List current symlinks and their targets.
    Show {
        /// Restrict to one layer; all dotfiles symlinks when omitted.
        layer: Option<String>,
    },

    /// Find broken dotfiles symlinks and clean them up.
    Check {
        /// Report broken symlinks without removing them.
        #[arg(
            long = "no-auto-fix",
            action = ArgAction::SetFalse,
            default_value_t = true
        )]
        auto_fix: bool,
    },

    /// Remove and recreate every symlink for a platform.
    Relink {
        /// Platform overlay to refresh (macos, wsl, arch, ...).
        platform: String,
    },

    /// Show the resolved configuration and available layers.
    Info,
}
