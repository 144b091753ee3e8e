use sea_orm::ConnectionTrait;

use crate::{
    data::{driver::DriverRepository, session::SessionRepository, year_sync::YearSyncRepository},
    error::Error,
    model::sync::{SyncOverview, YearSyncStatusDto},
};

/// Reports sync state to callers without touching it.
pub struct StatusService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatusService<'a, C> {
    /// Creates a new instance of [`StatusService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches the sync status for one season.
    ///
    /// A season no sync has ever been requested for reports as `not_started`
    /// rather than an error, so callers can poll any year uniformly.
    pub async fn get_year_status(&self, year: i32) -> Result<YearSyncStatusDto, Error> {
        let state = YearSyncRepository::new(self.db).find_by_year(year).await?;

        Ok(state
            .map(YearSyncStatusDto::from)
            .unwrap_or_else(|| YearSyncStatusDto::not_started(year)))
    }

    /// Fetches the status of every tracked season plus store-wide totals.
    pub async fn get_overview(&self) -> Result<SyncOverview, Error> {
        let years = YearSyncRepository::new(self.db)
            .find_all()
            .await?
            .into_iter()
            .map(YearSyncStatusDto::from)
            .collect();
        let total_drivers = DriverRepository::new(self.db).count().await?;
        let total_sessions = SessionRepository::new(self.db).count().await?;

        Ok(SyncOverview {
            years,
            total_drivers,
            total_sessions,
        })
    }
}
