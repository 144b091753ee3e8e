pub use super::constructor_stats::Entity as ConstructorStats;
pub use super::driver::Entity as Driver;
pub use super::driver_session::Entity as DriverSession;
pub use super::driver_session_stats::Entity as DriverSessionStats;
pub use super::driver_stats::Entity as DriverStats;
pub use super::lap::Entity as Lap;
pub use super::position::Entity as Position;
pub use super::session::Entity as Session;
pub use super::session_key_cache::Entity as SessionKeyCache;
pub use super::year_sync::Entity as YearSync;
