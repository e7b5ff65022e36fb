//! Load song metadata and listening-activity logs into the warehouse database.
//!
//! This crate owns the ETL flow: discovering JSON source files, turning each
//! file into star-schema rows, resolving fact-row keys against the songs
//! already loaded, and committing once per source file.

pub mod error;
pub mod log_import;
pub mod progress;
pub mod song_import;
pub mod walker;

pub use error::EtlError;
pub use log_import::process_log_file;
pub use progress::{LoadProgress, LogProgress, SilentProgress};
pub use song_import::process_song_file;
pub use walker::{FileStats, LoadStats, find_json_files, load_logs, load_songs, process_data};
