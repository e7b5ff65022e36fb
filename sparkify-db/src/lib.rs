//! SQLite persistence layer for the listening-activity star schema.
//!
//! Provides schema creation and reset, per-table inserts, the song/artist
//! lookup used to resolve fact rows, and read queries backed by SQLite
//! (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, SongMatch, find_song_and_artist, insert_artist, insert_song, insert_songplay,
    insert_time, insert_user,
};
pub use queries::{
    SongplayEntry, TableStats, find_time, find_user, list_songplays, table_stats,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, STAR_TABLES, open_database, open_memory, reset_schema};
