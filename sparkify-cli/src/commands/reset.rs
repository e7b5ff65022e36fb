use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::Settings;

use super::open_db;

/// Drop and recreate the star-schema tables.
pub(crate) fn run_reset(settings: &Settings) -> Result<(), CliError> {
    let db_path = &settings.database.path;
    let conn = open_db(db_path)?;

    sparkify_db::reset_schema(&conn)
        .map_err(|e| CliError::database(format!("Failed to reset tables: {}", e)))?;

    log::info!(
        "  {} Recreated {} in {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        sparkify_db::STAR_TABLES.join(", "),
        db_path.display(),
    );
    Ok(())
}
