//! sparkify CLI
//!
//! Command-line interface for loading song metadata and listening logs into
//! a star-schema SQLite database.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands};
use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.quiet, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(&cli.paths);
    let show_bar = !cli.quiet && !cli.verbose;

    match cli.command.unwrap_or(Commands::Load {
        songs_only: false,
        logs_only: false,
    }) {
        Commands::Load {
            songs_only,
            logs_only,
        } => commands::load::run_load(&settings, songs_only, logs_only, show_bar),
        Commands::Reset => commands::reset::run_reset(&settings),
        Commands::Stats => commands::stats::run_stats(&settings),
        Commands::Config => commands::config::run_config_show(cli.config.as_deref(), &settings),
    }
}
