use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::logging::log_blank;
use crate::settings::Settings;

use super::open_db;

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let db_path = &settings.database.path;

    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'sparkify load' to create one.");
        return Ok(());
    }

    let conn = open_db(db_path)?;
    let stats = sparkify_db::table_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query table stats: {}", e)))?;

    log::info!(
        "{}",
        "Warehouse Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    log_blank();
    log::info!("  songs:          {:>8}", stats.songs);
    log::info!("  artists:        {:>8}", stats.artists);
    log::info!("  time:           {:>8}", stats.time);
    log::info!("  users:          {:>8}", stats.users);
    log::info!("  songplays:      {:>8}", stats.songplays);
    log::info!(
        "    with song:    {:>8}",
        stats.songplays_matched,
    );

    Ok(())
}
