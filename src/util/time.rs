//! Time parsing and formatting utilities.
//!
//! This module handles the timestamp formats the OpenF1 API emits and the season window
//! boundaries used for chunked fetching. API timestamps arrive as RFC 3339 strings with
//! either a `Z` suffix, an explicit offset, or occasionally no timezone at all; everything
//! is normalized to naive UTC for storage.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};

use crate::error::Error;

/// Parses an OpenF1 API timestamp into a naive UTC datetime.
///
/// Accepts RFC 3339 timestamps with a `Z` suffix or numeric offset, with or without
/// fractional seconds. Timestamps without timezone information are assumed to already
/// be UTC.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - The parsed timestamp normalized to UTC
/// - `Err(Error::ParseError)` - The value matched none of the accepted formats
pub fn parse_wire_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.naive_utc());
    }

    // Some endpoints omit the offset entirely, those timestamps are UTC.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| Error::ParseError(format!("Failed to parse timestamp: {value}")))
}

/// Formats a lap duration in seconds as a `m:ss.mmm` display string.
pub fn format_lap_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let remainder = seconds - (minutes as f64) * 60.0;
    format!("{minutes}:{remainder:06.3}")
}

/// First instant of a season, January 1st at midnight UTC.
pub fn season_start(year: i32) -> Result<DateTime<Utc>, Error> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::ParseError(format!("Failed to construct season start for {year}")))
}

/// End-exclusive upper bound of a season, January 1st of the following year.
pub fn season_end_exclusive(year: i32) -> Result<DateTime<Utc>, Error> {
    season_start(year + 1)
}

/// Year of the season currently underway.
pub fn current_season_year() -> i32 {
    Utc::now().year()
}
