//! Import one event log file into the `time`, `users`, and `songplays` tables.
//!
//! Only "NextSong" events contribute rows. Each surviving event yields one
//! time row, one user row, and one songplay, with no de-duplication inside
//! the file; repeated keys are settled by the insert statements.

use std::path::Path;

use rusqlite::Connection;
use sparkify_db::operations;
use sparkify_model::parse_play_events;

use crate::error::EtlError;
use crate::walker::FileStats;

/// Read the events in `path` and insert their dimension and fact rows.
pub fn process_log_file(conn: &Connection, path: &Path) -> Result<FileStats, EtlError> {
    let content = std::fs::read_to_string(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_play_events(&content).map_err(|source| EtlError::Record {
        path: path.to_path_buf(),
        source,
    })?;

    let mut stats = FileStats::default();

    for event in &events {
        operations::insert_time(conn, &event.time_row())?;
        stats.time += 1;
    }

    for event in &events {
        operations::insert_user(conn, &event.user_row())?;
        stats.users += 1;
    }

    for event in &events {
        let found =
            operations::find_song_and_artist(conn, &event.song, &event.artist, event.length)?;
        let (song_id, artist_id) = match found {
            Some(m) => {
                stats.songplays_matched += 1;
                (Some(m.song_id), Some(m.artist_id))
            }
            None => (None, None),
        };

        let row = event.songplay_row(song_id, artist_id);
        log::debug!("{:?}", row);
        operations::insert_songplay(conn, &row)?;
        stats.songplays += 1;
    }

    Ok(stats)
}
