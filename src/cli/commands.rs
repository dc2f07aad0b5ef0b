//! CLI command definitions using clap.
//!
//! Without a subcommand the reconciliation engine runs. Subcommands:
//! - sweep: find and remove broken symlinks
//! - relink: rewrite a mount prefix inside symlink targets

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Linkreap - prune source media directories no library symlink points into
#[derive(Parser, Debug)]
#[command(name = "linkreap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub reconcile: ReconcileArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Reconciliation flags only apply when no subcommand is given
    pub fn has_stray_reconcile_flags(&self) -> bool {
        self.command.is_some() && self.reconcile.is_set()
    }
}

/// Flags for the default reconciliation run
#[derive(Args, Debug, Clone, Default)]
pub struct ReconcileArgs {
    /// Source folder (debrid mount); defaults to the configured source
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Destination folder (media library of symlinks); defaults to the configured destination
    #[arg(long)]
    pub dst: Option<PathBuf>,

    /// Print unused directories without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Delete unused directories without confirmation
    #[arg(long)]
    pub no_confirm: bool,
}

impl ReconcileArgs {
    /// True when any reconciliation flag was given
    pub fn is_set(&self) -> bool {
        self.src.is_some() || self.dst.is_some() || self.dry_run || self.no_confirm
    }
}

/// Auxiliary subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find and remove broken symlinks (dry run unless --force)
    Sweep {
        /// Directory to scan; defaults to the configured sweep dir
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Actually delete the broken symlinks
        #[arg(short, long)]
        force: bool,
    },

    /// Replace a mount prefix inside symlink targets
    Relink {
        /// Directory to search for symlinks (prompted for when omitted)
        directory: Option<PathBuf>,

        /// Old mount path to be replaced
        old_path: Option<String>,

        /// New mount path to replace with
        new_path: Option<String>,

        /// Report rewrites without touching links
        #[arg(long)]
        dry_run: bool,
    },
}
