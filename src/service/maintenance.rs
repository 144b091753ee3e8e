use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        driver_session::DriverSessionRepository, lap::LapRepository, session::SessionRepository,
        year_sync::YearSyncRepository,
    },
    error::Error,
    service::{reconcile::ReconcileService, stats::StatsService},
};

/// Destructive maintenance operations on the data store.
pub struct MaintenanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaintenanceService<'a> {
    /// Creates a new instance of [`MaintenanceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Drops every table and reapplies all migrations, leaving an empty schema.
    pub async fn reset_database(&self) -> Result<(), Error> {
        tracing::warn!("Resetting database, all stored data will be deleted");
        Migrator::fresh(self.db).await?;

        Ok(())
    }

    /// Deletes one season's lap data so the next sync refetches it from scratch.
    ///
    /// Fastest lap flags derived from laps are cleared along with the rows, and
    /// the season's incremental high-water mark is reset so the affected
    /// telemetry windows are walked again instead of being skipped.
    ///
    /// # Returns
    /// Number of lap rows deleted.
    pub async fn clear_lap_data(&self, year: i32) -> Result<u64, Error> {
        let txn = self.db.begin().await?;

        let sessions = SessionRepository::new(&txn).find_by_year(year).await?;
        let session_ids: Vec<i32> = sessions.iter().map(|session| session.id).collect();

        let driver_session_repo = DriverSessionRepository::new(&txn);
        let driver_session_ids: Vec<i32> = driver_session_repo
            .find_by_session_ids(&session_ids)
            .await?
            .iter()
            .map(|link| link.id)
            .collect();

        let deleted = LapRepository::new(&txn)
            .delete_by_driver_session_ids(&driver_session_ids)
            .await?;
        driver_session_repo.reset_fastest_laps(&session_ids).await?;
        YearSyncRepository::new(&txn).reset_incremental_sync(year).await?;

        txn.commit().await?;

        tracing::info!("Cleared {} lap records for {}", deleted, year);

        Ok(deleted)
    }

    /// Rederives one season's final positions from the stored position samples
    /// and refreshes the derived stats tables to match.
    ///
    /// Routine syncs only fill in missing final positions; run this when early
    /// partial data left stale placements behind.
    ///
    /// # Returns
    /// Number of participations whose final position was rewritten.
    pub async fn recompute_final_positions(&self, year: i32) -> Result<u64, Error> {
        let txn = self.db.begin().await?;

        let sessions = SessionRepository::new(&txn).find_by_year(year).await?;
        let session_ids: Vec<i32> = sessions.iter().map(|session| session.id).collect();
        let driver_session_ids: Vec<i32> = DriverSessionRepository::new(&txn)
            .find_by_session_ids(&session_ids)
            .await?
            .iter()
            .map(|link| link.id)
            .collect();

        let updated = ReconcileService::new(&txn)
            .recompute_final_positions(&driver_session_ids)
            .await?;
        StatsService::new(&txn).refresh_year(year).await?;

        txn.commit().await?;

        tracing::info!("Recomputed {} final positions for {}", updated, year);

        Ok(updated)
    }
}
