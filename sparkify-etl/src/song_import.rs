//! Import one song data file into the `songs` and `artists` tables.

use std::path::Path;

use rusqlite::Connection;
use sparkify_db::operations;
use sparkify_model::parse_song_record;

use crate::error::EtlError;
use crate::walker::FileStats;

/// Read the song record in `path` and insert its song and artist rows.
///
/// Only the first record in the file is used.
pub fn process_song_file(conn: &Connection, path: &Path) -> Result<FileStats, EtlError> {
    let content = std::fs::read_to_string(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record = parse_song_record(&content).map_err(|source| EtlError::Record {
        path: path.to_path_buf(),
        source,
    })?;

    operations::insert_song(conn, &record.song_row())?;
    operations::insert_artist(conn, &record.artist_row())?;

    Ok(FileStats {
        songs: 1,
        artists: 1,
        ..FileStats::default()
    })
}
