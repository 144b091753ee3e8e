pub use sea_orm_migration::prelude::*;

mod m20260410_000001_driver;
mod m20260410_000002_session;
mod m20260410_000003_driver_session;
mod m20260410_000004_position;
mod m20260410_000005_lap;
mod m20260410_000006_year_sync;
mod m20260410_000007_session_key_cache;
mod m20260410_000008_driver_stats;
mod m20260410_000009_constructor_stats;
mod m20260410_000010_driver_session_stats;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260410_000001_driver::Migration),
            Box::new(m20260410_000002_session::Migration),
            Box::new(m20260410_000003_driver_session::Migration),
            Box::new(m20260410_000004_position::Migration),
            Box::new(m20260410_000005_lap::Migration),
            Box::new(m20260410_000006_year_sync::Migration),
            Box::new(m20260410_000007_session_key_cache::Migration),
            Box::new(m20260410_000008_driver_stats::Migration),
            Box::new(m20260410_000009_constructor_stats::Migration),
            Box::new(m20260410_000010_driver_session_stats::Migration),
        ]
    }
}
