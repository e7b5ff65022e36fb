//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sparkify")]
#[command(about = "Load song metadata and listening logs into a star-schema database", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/sparkify/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for the database and data directory locations.
#[derive(Args, Clone, Default)]
pub(crate) struct PathArgs {
    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Root directory of the song metadata files
    #[arg(long, global = true)]
    pub song_dir: Option<PathBuf>,

    /// Root directory of the event log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load song files, then log files, into the database (default)
    Load {
        /// Only load the song metadata files
        #[arg(long, conflicts_with = "logs_only")]
        songs_only: bool,

        /// Only load the event log files
        #[arg(long)]
        logs_only: bool,
    },

    /// Drop and recreate the star-schema tables
    Reset,

    /// Show row counts for every table
    Stats,

    /// Print the resolved settings
    Config,
}
