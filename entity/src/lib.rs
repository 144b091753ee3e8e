pub mod prelude;

pub mod constructor_stats;
pub mod driver;
pub mod driver_session;
pub mod driver_session_stats;
pub mod driver_stats;
pub mod lap;
pub mod position;
pub mod session;
pub mod session_key_cache;
pub mod year_sync;
