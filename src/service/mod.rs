//! Motorsport data services.
//!
//! This module contains the business logic built on top of the repositories:
//! reconciling wire records into relational rows, orchestrating full and
//! incremental season syncs, recomputing derived statistics tables, reporting
//! sync state, and destructive maintenance operations.

pub mod maintenance;
pub mod reconcile;
pub mod stats;
pub mod status;
pub mod sync;

#[cfg(test)]
mod tests;
