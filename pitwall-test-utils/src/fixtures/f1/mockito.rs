//! Mock HTTP endpoint creation utilities.
//!
//! These methods register OpenF1-shaped endpoints with the mockito server
//! and verify they were called the expected number of times. Telemetry
//! endpoints match any query because the sync issues one request per month
//! window; tests that care about exact window bounds register their own
//! mocks with precise matchers.

use mockito::{Matcher, Mock};
use openf1::model::{DriverRecord, LapRecord, PositionRecord, SessionRecord};

use crate::fixtures::f1::F1Fixtures;

impl<'a> F1Fixtures<'a> {
    /// Create a mock endpoint for a year's session listing.
    pub fn create_sessions_endpoint(
        &mut self,
        year: i32,
        records: Vec<SessionRecord>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/sessions")
            .match_query(Matcher::UrlEncoded("year".into(), year.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&records).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint for one session's driver roster.
    pub fn create_drivers_endpoint(
        &mut self,
        session_key: i32,
        records: Vec<DriverRecord>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/drivers")
            .match_query(Matcher::UrlEncoded(
                "session_key".into(),
                session_key.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&records).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock position endpoint answering every month window with the
    /// same records.
    pub fn create_position_endpoint(
        &mut self,
        records: Vec<PositionRecord>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/position")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&records).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock laps endpoint answering every month window with the
    /// same records.
    pub fn create_laps_endpoint(
        &mut self,
        records: Vec<LapRecord>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/laps")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&records).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that fails every request with the given status.
    pub fn create_error_endpoint(
        &mut self,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body("mock upstream failure")
            .expect(expected_requests)
            .create()
    }
}
