use chrono::{NaiveDateTime, Utc};
use entity::year_sync::SyncStatus;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Repository for per-season sync state and the advisory lease guarding runs.
pub struct YearSyncRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> YearSyncRepository<'a, C> {
    /// Creates a new instance of [`YearSyncRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches the sync state for a season.
    pub async fn find_by_year(&self, year: i32) -> Result<Option<entity::year_sync::Model>, DbErr> {
        entity::prelude::YearSync::find()
            .filter(entity::year_sync::Column::Year.eq(year))
            .one(self.db)
            .await
    }

    /// Fetches sync state for every tracked season, most recent first.
    pub async fn find_all(&self) -> Result<Vec<entity::year_sync::Model>, DbErr> {
        entity::prelude::YearSync::find()
            .order_by_desc(entity::year_sync::Column::Year)
            .all(self.db)
            .await
    }

    /// Fetches the sync state for a season, creating a `not_started` row if none exists.
    pub async fn get_or_create(&self, year: i32) -> Result<entity::year_sync::Model, DbErr> {
        if let Some(year_sync) = self.find_by_year(year).await? {
            return Ok(year_sync);
        }

        entity::year_sync::ActiveModel {
            year: ActiveValue::Set(year),
            status: ActiveValue::Set(SyncStatus::NotStarted),
            progress: ActiveValue::Set(0),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Attempts to acquire the sync lease for a season.
    ///
    /// The lease is granted when no sync is in progress, or when the holder's lease was
    /// acquired before `stale_cutoff` and is therefore considered abandoned. Acquisition
    /// is a single conditional update so two concurrent runners cannot both win.
    ///
    /// # Returns
    /// `true` when the lease was acquired, `false` when another runner holds it.
    pub async fn try_acquire_lease(
        &self,
        year: i32,
        owner: &str,
        now: NaiveDateTime,
        stale_cutoff: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::YearSync::update_many()
            .col_expr(
                entity::year_sync::Column::Status,
                Expr::value(SyncStatus::InProgress),
            )
            .col_expr(
                entity::year_sync::Column::LeaseOwner,
                Expr::value(owner.to_string()),
            )
            .col_expr(
                entity::year_sync::Column::LeaseAcquiredAt,
                Expr::value(now),
            )
            .filter(entity::year_sync::Column::Year.eq(year))
            .filter(
                Condition::any()
                    .add(entity::year_sync::Column::Status.ne(SyncStatus::InProgress))
                    .add(entity::year_sync::Column::LeaseAcquiredAt.is_null())
                    .add(entity::year_sync::Column::LeaseAcquiredAt.lt(stale_cutoff)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a progress checkpoint for an in-progress sync.
    pub async fn update_progress(
        &self,
        year: i32,
        progress: i32,
        message: &str,
    ) -> Result<(), DbErr> {
        entity::prelude::YearSync::update_many()
            .col_expr(entity::year_sync::Column::Progress, Expr::value(progress))
            .col_expr(
                entity::year_sync::Column::Message,
                Expr::value(message.to_string()),
            )
            .filter(entity::year_sync::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a season sync as completed and releases the lease.
    ///
    /// # Arguments
    /// - `drivers_count`: Distinct drivers linked to the season
    /// - `sessions_count`: Sessions stored for the season
    /// - `last_incremental_sync`: High-water mark for incremental syncs, stored only
    ///   when provided so completing a past season leaves the mark untouched
    pub async fn mark_completed(
        &self,
        year: i32,
        drivers_count: i32,
        sessions_count: i32,
        last_incremental_sync: Option<NaiveDateTime>,
    ) -> Result<(), DbErr> {
        let mut query = entity::prelude::YearSync::update_many()
            .col_expr(
                entity::year_sync::Column::Status,
                Expr::value(SyncStatus::Completed),
            )
            .col_expr(entity::year_sync::Column::Progress, Expr::value(100))
            .col_expr(
                entity::year_sync::Column::Message,
                Expr::value("Sync completed successfully".to_string()),
            )
            .col_expr(
                entity::year_sync::Column::LastSynced,
                Expr::value(Utc::now().naive_utc()),
            )
            .col_expr(
                entity::year_sync::Column::DriversCount,
                Expr::value(drivers_count),
            )
            .col_expr(
                entity::year_sync::Column::SessionsCount,
                Expr::value(sessions_count),
            )
            .col_expr(
                entity::year_sync::Column::LeaseOwner,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::year_sync::Column::LeaseAcquiredAt,
                Expr::value(Option::<NaiveDateTime>::None),
            );

        if let Some(mark) = last_incremental_sync {
            query = query.col_expr(
                entity::year_sync::Column::LastIncrementalSync,
                Expr::value(mark),
            );
        }

        query
            .filter(entity::year_sync::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a season sync as failed and releases the lease.
    ///
    /// Progress is left where the sync stopped so the failing stage stays visible.
    pub async fn mark_error(&self, year: i32, message: &str) -> Result<(), DbErr> {
        self.mark_stopped(year, SyncStatus::Error, message).await
    }

    /// Marks a season sync as incomplete (partial data stored, retry worthwhile) and
    /// releases the lease.
    pub async fn mark_incomplete(&self, year: i32, message: &str) -> Result<(), DbErr> {
        self.mark_stopped(year, SyncStatus::Incomplete, message)
            .await
    }

    async fn mark_stopped(
        &self,
        year: i32,
        status: SyncStatus,
        message: &str,
    ) -> Result<(), DbErr> {
        entity::prelude::YearSync::update_many()
            .col_expr(entity::year_sync::Column::Status, Expr::value(status))
            .col_expr(
                entity::year_sync::Column::Message,
                Expr::value(message.to_string()),
            )
            .col_expr(
                entity::year_sync::Column::LeaseOwner,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::year_sync::Column::LeaseAcquiredAt,
                Expr::value(Option::<NaiveDateTime>::None),
            )
            .filter(entity::year_sync::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Clears the incremental sync high-water mark for one season.
    ///
    /// Used after the season's lap data is purged so the next sync refetches the
    /// full season window instead of resuming past the deleted rows.
    pub async fn reset_incremental_sync(&self, year: i32) -> Result<(), DbErr> {
        entity::prelude::YearSync::update_many()
            .col_expr(
                entity::year_sync::Column::LastIncrementalSync,
                Expr::value(Option::<NaiveDateTime>::None),
            )
            .filter(entity::year_sync::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
