//! Wire records returned by the OpenF1 API.
//!
//! The API omits fields freely, so everything that is not a hard natural key
//! is optional. Timestamps arrive as ISO-8601 strings, usually `Z`-suffixed;
//! parsing is left to the consumer so that malformed rows can be skipped
//! individually instead of failing a whole response.

use serde::{Deserialize, Serialize};

/// One entry from `GET /sessions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_key: Option<i32>,
    pub session_name: Option<String>,
    pub session_type: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub gmt_offset: Option<String>,
    pub meeting_key: Option<i32>,
    pub location: Option<String>,
    pub country_name: Option<String>,
    pub circuit_short_name: Option<String>,
    pub year: Option<i32>,
}

/// One entry from `GET /drivers`, scoped to a single session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub driver_number: Option<i32>,
    pub session_key: Option<i32>,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
    pub team_colour: Option<String>,
    pub country_code: Option<String>,
    pub headshot_url: Option<String>,
}

/// One entry from `GET /position`: the car's running position at an instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub session_key: Option<i32>,
    pub driver_number: Option<i32>,
    pub date: Option<String>,
    pub position: Option<i32>,
}

/// One entry from `GET /laps`. `lap_duration` is null while a lap is in
/// progress or when timing data was lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    pub session_key: Option<i32>,
    pub driver_number: Option<i32>,
    pub lap_number: Option<i32>,
    pub lap_duration: Option<f64>,
}
