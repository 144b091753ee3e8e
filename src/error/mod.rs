//! Error types for the Pitwall application.
//!
//! This module provides the application-wide error handling system with specialized error
//! types for different domains (configuration, synchronization). All errors use `thiserror`
//! for ergonomic definitions with automatic `Display` and `Error` trait implementations,
//! and aggregate into a single [`Error`] type for `?` propagation across layers.

pub mod config;
pub mod retry;
pub mod sync;

use thiserror::Error;

use crate::error::{config::ConfigError, sync::SyncError};

/// Main error type for the Pitwall application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Synchronization errors (lease conflicts, empty seasons, invalid years)
/// - OpenF1 client errors (rate limiting, transport failures, decode failures)
/// - External library errors (database, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Synchronization error (lease conflicts, empty API results, invalid years).
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// OpenF1 API client error (rate limiting, transport failures, decode failures).
    #[error(transparent)]
    SourceError(#[from] openf1::Error),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Pitwall's code.
    ///
    /// This error should never occur in normal operation and indicates a programming error
    /// that needs to be reported as a GitHub issue.
    #[error("Internal error with Pitwall's code, please open a GitHub issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
