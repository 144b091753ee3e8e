//! Pitwall application core modules.
//!
//! This crate contains all functionality for the Pitwall synchronization engine: fetching
//! motorsport timing data from the OpenF1 API, reconciling it into a local database, tracking
//! per-season sync state, and maintaining derived championship statistics. The binary entry
//! point wires these modules together and runs the scheduler for automatic incremental syncs.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
