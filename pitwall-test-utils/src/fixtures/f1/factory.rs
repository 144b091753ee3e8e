//! Wire record factories with deterministic per-key values.
//!
//! Records are shaped like real OpenF1 payloads: timestamps are `Z`-suffixed
//! ISO-8601 strings and every derived field is a pure function of the keys,
//! so two calls with the same arguments always agree.

use openf1::model::{DriverRecord, LapRecord, PositionRecord, SessionRecord};

/// Day of month a session lands on, shared by record and database fixtures.
pub fn session_day(session_key: i32) -> u32 {
    (session_key.rem_euclid(27) + 1) as u32
}

/// Build a session record for `GET /sessions`.
///
/// The session runs 14:00-16:00 UTC on a July day derived from the key, so
/// distinct keys get distinct start times within a year.
pub fn mock_session_record(
    session_key: i32,
    year: i32,
    session_type: &str,
    session_name: &str,
) -> SessionRecord {
    let day = session_day(session_key);

    SessionRecord {
        session_key: Some(session_key),
        session_name: Some(session_name.to_string()),
        session_type: Some(session_type.to_string()),
        date_start: Some(format!("{year}-07-{day:02}T14:00:00Z")),
        date_end: Some(format!("{year}-07-{day:02}T16:00:00Z")),
        gmt_offset: Some("00:00:00".to_string()),
        meeting_key: Some(session_key / 10),
        location: Some(format!("Location {}", session_key % 100)),
        country_name: Some("Testland".to_string()),
        circuit_short_name: Some(format!("Circuit {}", session_key % 100)),
        year: Some(year),
    }
}

/// Build a driver roster record for `GET /drivers`.
///
/// Drivers pair up into teams (numbers 1 and 2 share Team 1, 3 and 4 share
/// Team 2, ...), which gives constructor aggregation something to sum.
pub fn mock_driver_record(driver_number: i32, session_key: i32) -> DriverRecord {
    DriverRecord {
        driver_number: Some(driver_number),
        session_key: Some(session_key),
        full_name: Some(format!("Driver {driver_number}")),
        team_name: Some(format!("Team {}", (driver_number + 1) / 2)),
        team_colour: Some(format!("{:06X}", (driver_number as u32) * 3357 % 0xFFFFFF)),
        country_code: Some("TST".to_string()),
        headshot_url: Some(format!("https://example.com/headshots/{driver_number}.png")),
    }
}

/// Build a position sample for `GET /position`.
pub fn mock_position_record(
    session_key: i32,
    driver_number: i32,
    date: &str,
    position: i32,
) -> PositionRecord {
    PositionRecord {
        session_key: Some(session_key),
        driver_number: Some(driver_number),
        date: Some(date.to_string()),
        position: Some(position),
    }
}

/// Build a lap record for `GET /laps`.
pub fn mock_lap_record(
    session_key: i32,
    driver_number: i32,
    lap_number: i32,
    lap_duration: Option<f64>,
) -> LapRecord {
    LapRecord {
        session_key: Some(session_key),
        driver_number: Some(driver_number),
        lap_number: Some(lap_number),
        lap_duration,
    }
}
