//! Song and listening-activity data model, source record parsing, and
//! timestamp decomposition.
//!
//! This crate has no database dependencies. It turns the raw JSON found in
//! song-metadata and event-log files into typed records, and those records
//! into the flat rows of the star schema that `sparkify-db` persists.

pub mod records;
pub mod time;
pub mod types;

pub use records::{NEXT_SONG_PAGE, RecordError, parse_play_events, parse_song_record};
pub use time::{START_TIME_FORMAT, format_start_time, start_time_from_millis};
pub use types::*;
