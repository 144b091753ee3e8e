//! Client for the OpenF1 public telemetry API.
//!
//! OpenF1 serves historical Formula 1 timing data (sessions, driver rosters, car
//! positions, lap times) as JSON arrays over plain GET endpoints. The API is
//! rate limited and rewards polite clients, so this crate bakes in the two
//! disciplines every caller needs: exponential backoff on 429 responses and
//! calendar-month chunking for long date-range queries.

pub mod chunk;
pub mod client;
pub mod error;
pub mod model;

pub use client::{Client, ClientBuilder};
pub use error::Error;

#[cfg(test)]
mod tests;
