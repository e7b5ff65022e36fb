//! Epoch-millisecond conversion for event timestamps.

use chrono::{DateTime, NaiveDateTime};

/// Text form of `start_time` as stored in the database.
pub const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Convert UTC epoch milliseconds to a naive UTC datetime.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn start_time_from_millis(ts: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ts).map(|dt| dt.naive_utc())
}

/// Render a start time in [`START_TIME_FORMAT`].
pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}
