pub(crate) mod config;
pub(crate) mod load;
pub(crate) mod reset;
pub(crate) mod stats;

use std::path::Path;

use sparkify_db::Connection;

use crate::error::CliError;

/// Open (or create) the warehouse database, mapping failures to a CLI error.
pub(crate) fn open_db(path: &Path) -> Result<Connection, CliError> {
    sparkify_db::open_database(path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            path.display(),
            e
        ))
    })
}
