//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organized by
//! entity: timing data (drivers, sessions, participations, positions, laps), sync
//! bookkeeping (year state, session key cache), and derived statistics.
//!
//! Every repository is generic over [`sea_orm::ConnectionTrait`] so callers can run
//! queries on the shared connection pool or inside a transaction.

pub mod driver;
pub mod driver_session;
pub mod lap;
pub mod position;
pub mod session;
pub mod session_cache;
pub mod stats;
pub mod year_sync;

#[cfg(test)]
mod tests;
