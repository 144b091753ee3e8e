use migration::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

/// A lap row ready for insertion.
///
/// Laps without a measured duration are dropped before this point, so `lap_time` is
/// always present here even though the column is nullable.
#[derive(Clone, Debug)]
pub struct LapInsert {
    /// Participation the lap belongs to.
    pub driver_session_id: i32,
    /// Lap number within the session, starting at 1.
    pub lap_number: i32,
    /// Lap duration in seconds.
    pub lap_time: f64,
    /// Pre-formatted `m:ss.mmm` display string.
    pub lap_time_string: String,
}

/// Repository for completed laps.
///
/// Laps are unique per `(driver_session_id, lap_number)`; callers fetch the existing
/// pairs via [`LapRepository::find_keys_by_driver_session_ids`] and insert only the
/// missing ones.
pub struct LapRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LapRepository<'a, C> {
    /// Creates a new instance of [`LapRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches `(driver_session_id, lap_number)` pairs for the given participations.
    pub async fn find_keys_by_driver_session_ids(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<Vec<(i32, i32)>, DbErr> {
        entity::prelude::Lap::find()
            .select_only()
            .column(entity::lap::Column::DriverSessionId)
            .column(entity::lap::Column::LapNumber)
            .filter(
                entity::lap::Column::DriverSessionId.is_in(driver_session_ids.iter().copied()),
            )
            .into_tuple::<(i32, i32)>()
            .all(self.db)
            .await
    }

    /// Inserts laps in batches.
    ///
    /// A failed batch statement falls back to inserting its rows one at a
    /// time, so a single bad row costs only itself rather than the whole
    /// batch. Skipped rows are logged at warn.
    ///
    /// # Returns
    /// Number of rows inserted.
    pub async fn insert_many(&self, laps: Vec<LapInsert>) -> Result<u64, DbErr> {
        if laps.is_empty() {
            return Ok(0);
        }

        const BATCH_SIZE: usize = 100;
        let mut inserted = 0;

        for batch in laps.chunks(BATCH_SIZE) {
            let models = batch.iter().map(|lap| entity::lap::ActiveModel {
                driver_session_id: ActiveValue::Set(lap.driver_session_id),
                lap_number: ActiveValue::Set(lap.lap_number),
                lap_time: ActiveValue::Set(Some(lap.lap_time)),
                lap_time_string: ActiveValue::Set(Some(lap.lap_time_string.clone())),
                is_fastest: ActiveValue::Set(false),
                ..Default::default()
            });

            match entity::prelude::Lap::insert_many(models).exec(self.db).await {
                Ok(_) => inserted += batch.len() as u64,
                Err(error) => {
                    tracing::warn!(
                        "Lap batch insert failed, retrying rows individually: {}",
                        error
                    );
                    inserted += self.insert_fallback(batch).await;
                }
            }
        }

        Ok(inserted)
    }

    async fn insert_fallback(&self, batch: &[LapInsert]) -> u64 {
        let mut inserted = 0;

        for lap in batch {
            let model = entity::lap::ActiveModel {
                driver_session_id: ActiveValue::Set(lap.driver_session_id),
                lap_number: ActiveValue::Set(lap.lap_number),
                lap_time: ActiveValue::Set(Some(lap.lap_time)),
                lap_time_string: ActiveValue::Set(Some(lap.lap_time_string.clone())),
                is_fastest: ActiveValue::Set(false),
                ..Default::default()
            };

            match entity::prelude::Lap::insert(model).exec(self.db).await {
                Ok(_) => inserted += 1,
                Err(error) => tracing::warn!(
                    "Skipping lap {} for participation {}: {}",
                    lap.lap_number,
                    lap.driver_session_id,
                    error
                ),
            }
        }

        inserted
    }

    /// Fetches `(id, driver_session_id, lap_time)` for every timed lap in the given
    /// participations.
    pub async fn find_timed_by_driver_session_ids(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<Vec<(i32, i32, f64)>, DbErr> {
        entity::prelude::Lap::find()
            .select_only()
            .column(entity::lap::Column::Id)
            .column(entity::lap::Column::DriverSessionId)
            .column(entity::lap::Column::LapTime)
            .filter(
                entity::lap::Column::DriverSessionId.is_in(driver_session_ids.iter().copied()),
            )
            .filter(entity::lap::Column::LapTime.is_not_null())
            .into_tuple::<(i32, i32, f64)>()
            .all(self.db)
            .await
    }

    /// Clears the fastest flag for every lap in the given participations.
    pub async fn reset_fastest(&self, driver_session_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::Lap::update_many()
            .col_expr(entity::lap::Column::IsFastest, Expr::value(false))
            .filter(
                entity::lap::Column::DriverSessionId.is_in(driver_session_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a single lap as the fastest of its session.
    pub async fn mark_fastest(&self, lap_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lap::update_many()
            .col_expr(entity::lap::Column::IsFastest, Expr::value(true))
            .filter(entity::lap::Column::Id.eq(lap_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every lap belonging to the given participations.
    ///
    /// # Returns
    /// Number of rows deleted.
    pub async fn delete_by_driver_session_ids(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Lap::delete_many()
            .filter(
                entity::lap::Column::DriverSessionId.is_in(driver_session_ids.iter().copied()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
