//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases simplify type signatures and provide a single
//! point of reference for database model types, making it easier to work with entities
//! without importing from the generated `entity` crate directly.

/// Type alias for the driver database model.
///
/// Represents a driver identified by their permanent car number, with the team and
/// profile details from the most recent session the driver appeared in.
pub type DriverModel = entity::driver::Model;

/// Type alias for the session database model.
///
/// Represents a single timed session (practice, qualifying, sprint, or race) within a
/// season, identified by its upstream session key.
pub type SessionModel = entity::session::Model;

/// Type alias for the driver session participation model.
///
/// Links a driver to a session they took part in and carries per-participation results:
/// the final classified position and whether the driver set the session's fastest lap.
pub type DriverSessionModel = entity::driver_session::Model;

/// Type alias for the per-year sync state model.
///
/// Tracks sync lifecycle status, progress percentage, status message, completion
/// timestamps, and the advisory lease guarding concurrent runs.
pub type YearSyncModel = entity::year_sync::Model;

/// Type alias for the per-driver season statistics model.
pub type DriverStatsModel = entity::driver_stats::Model;

/// Type alias for the per-constructor season statistics model.
pub type ConstructorStatsModel = entity::constructor_stats::Model;

/// Type alias for the per-driver session result statistics model.
pub type DriverSessionStatsModel = entity::driver_session_stats::Model;
