//! Command-line configuration
//!
//! Everything is configured from arguments, with environment fall-backs for
//! the global options:
//! - `--log-level` / `QUESTKIT_LOG` (ignored when `RUST_LOG` is set)

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "questkit",
    about = "Inspect BIG archives and edit QST quest lists",
    version
)]
pub struct Cli {
    /// Log filter, e.g. `info` or `questkit_formats=debug`
    #[arg(long, global = true, env = "QUESTKIT_LOG", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }
}

/// Top-level subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Work with BIG archives
    #[command(subcommand)]
    Big(BigCommand),
    /// Work with QST quest lists
    #[command(subcommand)]
    Qst(QstCommand),
}

/// BIG archive subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum BigCommand {
    /// Show the archive header and bank table
    Info {
        /// Archive to read
        archive: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List entries
    List {
        /// Archive to read
        archive: PathBuf,
        /// Only list entries of this bank
        #[arg(long)]
        bank: Option<String>,
    },
    /// Write one entry's payload to a file
    Extract(ExtractArgs),
}

/// Arguments of `big extract`
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Archive to read
    pub archive: PathBuf,
    /// Symbol name of the entry (case-insensitive)
    pub symbol: String,
    /// Destination file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// QST subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum QstCommand {
    /// List registered quests
    List {
        /// Quest list to read
        file: PathBuf,
    },
    /// Register a quest unless it is already listed, then save
    Add {
        /// Quest list to edit
        file: PathBuf,
        /// Quest name
        name: String,
        /// Register the quest as disabled
        #[arg(long)]
        disabled: bool,
        /// Save to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
