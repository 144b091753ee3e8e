//! Shared application model types.
//!
//! This module contains types passed between layers of the application: shared runtime
//! state, database model aliases, and synchronization status reporting types.

pub mod app;
pub mod db;
pub mod sync;
