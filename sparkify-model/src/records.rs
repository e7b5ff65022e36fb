//! Parsing of song data files and event log files into typed records.
//!
//! Song files hold a single JSON object; log files hold one JSON object per
//! line. Both are validated here so that downstream code never touches an
//! untyped map.

use thiserror::Error;

use crate::types::{LogEvent, PlayEvent, SongRecord};

/// The `page` value that marks an actual song playback in the event log.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// A source record that could not be turned into typed data.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Invalid JSON, or JSON whose shape does not match the record type
    /// (wrong type, missing required key).
    #[error("malformed record at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid value for `{field}`: {value}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("file contains no record")]
    Empty,
}

/// Parse the contents of a song data file.
///
/// Only the first record is used; anything after it is ignored.
pub fn parse_song_record(content: &str) -> Result<SongRecord, RecordError> {
    let mut stream = serde_json::Deserializer::from_str(content).into_iter::<SongRecord>();
    match stream.next() {
        Some(Ok(record)) => Ok(record),
        Some(Err(e)) => Err(RecordError::Json {
            line: e.line(),
            source: e,
        }),
        None => Err(RecordError::Empty),
    }
}

/// Parse the contents of an event log file, keeping only playback events.
///
/// Every non-blank line must be a well-formed JSON object with a `page`
/// key. Lines whose page is not [`NEXT_SONG_PAGE`] are dropped; the rest must
/// carry every playback field. Order of the surviving events is preserved.
pub fn parse_play_events(content: &str) -> Result<Vec<PlayEvent>, RecordError> {
    let mut events = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let event: LogEvent =
            serde_json::from_str(raw).map_err(|source| RecordError::Json { line, source })?;
        if event.page != NEXT_SONG_PAGE {
            continue;
        }

        events.push(PlayEvent::from_log_event(event, line)?);
    }

    Ok(events)
}
