//! Read queries for the warehouse database.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, params};
use sparkify_model::types::{TimeRow, UserRow};
use sparkify_model::{START_TIME_FORMAT, format_start_time};

use crate::operations::OperationError;

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for the star schema.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub songs: i64,
    pub artists: i64,
    pub time: i64,
    pub users: i64,
    pub songplays: i64,
    /// Songplays whose song and artist were resolved at load time.
    pub songplays_matched: i64,
}

/// Count rows in every star-schema table.
pub fn table_stats(conn: &Connection) -> Result<TableStats, OperationError> {
    let count = |sql: &str| conn.query_row(sql, [], |r| r.get::<_, i64>(0));

    Ok(TableStats {
        songs: count("SELECT COUNT(*) FROM songs")?,
        artists: count("SELECT COUNT(*) FROM artists")?,
        time: count("SELECT COUNT(*) FROM time")?,
        users: count("SELECT COUNT(*) FROM users")?,
        songplays: count("SELECT COUNT(*) FROM songplays")?,
        songplays_matched: count("SELECT COUNT(*) FROM songplays WHERE song_id IS NOT NULL")?,
    })
}

// ── Fact Queries ────────────────────────────────────────────────────────────

/// A stored songplay, including its generated key.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayEntry {
    pub songplay_id: i64,
    pub start_time: String,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// List all songplays in insertion order.
pub fn list_songplays(conn: &Connection) -> Result<Vec<SongplayEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT songplay_id, start_time, user_id, level, song_id, artist_id,
                session_id, location, user_agent
         FROM songplays ORDER BY songplay_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(SongplayEntry {
            songplay_id: row.get(0)?,
            start_time: row.get(1)?,
            user_id: row.get(2)?,
            level: row.get(3)?,
            song_id: row.get(4)?,
            artist_id: row.get(5)?,
            session_id: row.get(6)?,
            location: row.get(7)?,
            user_agent: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Dimension Lookups ───────────────────────────────────────────────────────

/// Find the time row for a start time.
pub fn find_time(
    conn: &Connection,
    start_time: &NaiveDateTime,
) -> Result<Option<TimeRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT start_time, hour, day, week, month, year, weekday
         FROM time WHERE start_time = ?1",
    )?;
    let result = stmt.query_row(params![format_start_time(start_time)], |row| {
        let text: String = row.get(0)?;
        let start_time = NaiveDateTime::parse_from_str(&text, START_TIME_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
        Ok(TimeRow {
            start_time,
            hour: row.get(1)?,
            day: row.get(2)?,
            week: row.get(3)?,
            month: row.get(4)?,
            year: row.get(5)?,
            weekday: row.get(6)?,
        })
    });
    match result {
        Ok(t) => Ok(Some(t)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a user by id.
pub fn find_user(conn: &Connection, user_id: i64) -> Result<Option<UserRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT user_id, first_name, last_name, gender, level
         FROM users WHERE user_id = ?1",
    )?;
    let result = stmt.query_row(params![user_id], |row| {
        Ok(UserRow {
            user_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            gender: row.get(3)?,
            level: row.get(4)?,
        })
    });
    match result {
        Ok(u) => Ok(Some(u)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
