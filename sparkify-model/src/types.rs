//! Data model types for the listening-activity warehouse.
//!
//! Source records mirror the JSON found on disk; row types mirror the five
//! tables of the star schema (`songs`, `artists`, `time`, `users`, `songplays`).

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::records::RecordError;
use crate::time::start_time_from_millis;

// ── Source Records ──────────────────────────────────────────────────────────

/// One song-metadata record, as stored in a song data file.
///
/// Unknown keys (e.g. `num_songs`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default)]
    pub artist_latitude: Option<f64>,
    #[serde(default)]
    pub artist_longitude: Option<f64>,
    pub year: i32,
    pub duration: f64,
}

impl SongRecord {
    /// The `songs` dimension row for this record.
    pub fn song_row(&self) -> SongRow {
        SongRow {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    /// The `artists` dimension row for this record.
    pub fn artist_row(&self) -> ArtistRow {
        ArtistRow {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

/// A user id as it appears in event logs: sometimes a number, usually a
/// numeric string, and an empty string for logged-out events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUserId {
    Number(i64),
    Text(String),
}

/// One line of an event log, before page filtering.
///
/// Only `page` is required here: non-playback events (login, home, ...)
/// legitimately omit song and user fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub page: String,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub user_id: Option<RawUserId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// A validated song-playback ("NextSong") event with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub start_time: NaiveDateTime,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub length: f64,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

impl PlayEvent {
    /// Promote a raw log line to a playback event, requiring every field.
    ///
    /// `line` is the 1-based line number used in error reports.
    pub fn from_log_event(event: LogEvent, line: usize) -> Result<Self, RecordError> {
        let missing = |field: &'static str| RecordError::MissingField { line, field };

        let ts = event.ts.ok_or_else(|| missing("ts"))?;
        let start_time = start_time_from_millis(ts).ok_or(RecordError::InvalidField {
            line,
            field: "ts",
            value: ts.to_string(),
        })?;

        let user_id = match event.user_id {
            Some(RawUserId::Number(n)) => n,
            Some(RawUserId::Text(s)) if s.trim().is_empty() => return Err(missing("userId")),
            Some(RawUserId::Text(s)) => {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| RecordError::InvalidField {
                        line,
                        field: "userId",
                        value: s.clone(),
                    })?
            }
            None => return Err(missing("userId")),
        };

        Ok(Self {
            start_time,
            user_id,
            first_name: event.first_name.ok_or_else(|| missing("firstName"))?,
            last_name: event.last_name.ok_or_else(|| missing("lastName"))?,
            gender: event.gender.ok_or_else(|| missing("gender"))?,
            level: event.level.ok_or_else(|| missing("level"))?,
            song: event.song.ok_or_else(|| missing("song"))?,
            artist: event.artist.ok_or_else(|| missing("artist"))?,
            length: event.length.ok_or_else(|| missing("length"))?,
            session_id: event.session_id.ok_or_else(|| missing("sessionId"))?,
            location: event.location.ok_or_else(|| missing("location"))?,
            user_agent: event.user_agent.ok_or_else(|| missing("userAgent"))?,
        })
    }

    /// The `time` dimension row for this event.
    pub fn time_row(&self) -> TimeRow {
        TimeRow::from_start_time(self.start_time)
    }

    /// The `users` dimension row for this event.
    pub fn user_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    /// The `songplays` fact row for this event, given the lookup outcome.
    pub fn songplay_row(&self, song_id: Option<String>, artist_id: Option<String>) -> SongplayRow {
        SongplayRow {
            start_time: self.start_time,
            user_id: self.user_id,
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

// ── Star Schema Rows ────────────────────────────────────────────────────────

/// A row of the `songs` dimension table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

/// A row of the `artists` dimension table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A row of the `time` dimension table.
///
/// `week` is the ISO week number; `weekday` counts from Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeRow {
    /// Decompose a UTC timestamp into its calendar parts.
    pub fn from_start_time(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_monday(),
        }
    }
}

/// A row of the `users` dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub level: String,
}

/// A row of the `songplays` fact table. The synthetic key is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: NaiveDateTime,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}
