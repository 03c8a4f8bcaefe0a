//! Timestamp handling for arrival times.
//!
//! The API reports times as ISO-8601 strings with a UTC offset, for example
//! `2024-03-15T14:05:00-04:00`. We keep the wall-clock fields and drop the
//! offset so the result can be compared against a naive local "now".
//!
//! Dropping the offset is only correct when the API's offset matches the
//! local one. Around DST transitions, or when run outside the service's
//! timezone, the computed minutes are off by the offset difference.

use chrono::{DateTime, NaiveDateTime};

use super::error::DataFormatError;

/// Parse an API timestamp and strip its offset.
///
/// Strings without an offset are accepted as already-local.
///
/// # Examples
///
/// ```
/// use next_stop::domain::parse_local_timestamp;
///
/// let t = parse_local_timestamp("2024-03-15T14:05:00-04:00").unwrap();
/// assert_eq!(t.to_string(), "2024-03-15 14:05:00");
///
/// assert!(parse_local_timestamp("14:05").is_err());
/// ```
pub fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime, DataFormatError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.naive_local()),
        Err(offset_err) => value
            .parse::<NaiveDateTime>()
            .map_err(|_| DataFormatError::InvalidTimestamp {
                value: value.to_string(),
                message: offset_err.to_string(),
            }),
    }
}

/// Whole minutes from `now` until `at`, rounded to the nearest minute.
///
/// Halfway values round to the even minute, so 2m30s is 2 and 3m30s is 4.
/// Negative results mean the time has already passed.
pub fn minutes_until(at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let millis = at.signed_duration_since(now).num_milliseconds();
    (millis as f64 / 60_000.0).round_ties_even() as i64
}
