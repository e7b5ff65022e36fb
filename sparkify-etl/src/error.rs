use std::path::PathBuf;

use sparkify_db::OperationError;
use sparkify_model::RecordError;
use thiserror::Error;

/// Errors that abort a load run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed record in {}: {source}", path.display())]
    Record { path: PathBuf, source: RecordError },
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
