//! Insert operations for every star-schema table, plus the song/artist
//! point lookup used when building fact rows.
//!
//! Duplicate-key handling lives in the statements themselves: callers issue
//! one insert per derived row and never check for existing keys first.

use rusqlite::{Connection, params};
use sparkify_model::types::*;
use sparkify_model::format_start_time;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// ── Dimension Inserts ───────────────────────────────────────────────────────

/// Insert a song. An existing `song_id` is left untouched.
pub fn insert_song(conn: &Connection, song: &SongRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO songs (song_id, title, artist_id, year, duration)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(song_id) DO NOTHING",
        params![
            song.song_id,
            song.title,
            song.artist_id,
            song.year,
            song.duration,
        ],
    )?;
    Ok(())
}

/// Insert an artist. An existing `artist_id` is left untouched.
pub fn insert_artist(conn: &Connection, artist: &ArtistRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO artists (artist_id, name, location, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(artist_id) DO NOTHING",
        params![
            artist.artist_id,
            artist.name,
            artist.location,
            artist.latitude,
            artist.longitude,
        ],
    )?;
    Ok(())
}

/// Insert a time row. Timestamps already present are ignored.
pub fn insert_time(conn: &Connection, time: &TimeRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(start_time) DO NOTHING",
        params![
            format_start_time(&time.start_time),
            time.hour,
            time.day,
            time.week,
            time.month,
            time.year,
            time.weekday,
        ],
    )?;
    Ok(())
}

/// Insert or update a user.
///
/// A user seen again keeps its name and gender but takes the newest
/// subscription level.
pub fn insert_user(conn: &Connection, user: &UserRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO users (user_id, first_name, last_name, gender, level)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id) DO UPDATE SET
             level = excluded.level",
        params![
            user.user_id,
            user.first_name,
            user.last_name,
            user.gender,
            user.level,
        ],
    )?;
    Ok(())
}

// ── Fact Insert ─────────────────────────────────────────────────────────────

/// Insert a songplay. Returns the generated `songplay_id`.
pub fn insert_songplay(conn: &Connection, play: &SongplayRow) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id,
             session_id, location, user_agent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            format_start_time(&play.start_time),
            play.user_id,
            play.level,
            play.song_id,
            play.artist_id,
            play.session_id,
            play.location,
            play.user_agent,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Lookup ──────────────────────────────────────────────────────────────────

/// Keys of a song and its artist, as resolved for a playback event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Find the song whose title, artist name, and duration all equal the given
/// values exactly. No normalization is applied to any of the three.
pub fn find_song_and_artist(
    conn: &Connection,
    title: &str,
    artist_name: &str,
    duration: f64,
) -> Result<Option<SongMatch>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT s.song_id, a.artist_id
         FROM songs s JOIN artists a ON s.artist_id = a.artist_id
         WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
         LIMIT 1",
    )?;
    let result = stmt.query_row(params![title, artist_name, duration], |row| {
        Ok(SongMatch {
            song_id: row.get(0)?,
            artist_id: row.get(1)?,
        })
    });
    match result {
        Ok(m) => Ok(Some(m)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
