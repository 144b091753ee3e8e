use chrono::NaiveDateTime;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

/// Repository for timestamped running-order samples.
///
/// Position samples have no upstream identifier, so duplicates are detected by the
/// `(driver_session_id, date, position)` triple. Callers fetch the existing triples via
/// [`PositionRepository::find_keys_by_driver_session_ids`] and insert only the missing ones.
pub struct PositionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PositionRepository<'a, C> {
    /// Creates a new instance of [`PositionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches `(driver_session_id, date, position)` triples for the given participations.
    pub async fn find_keys_by_driver_session_ids(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<Vec<(i32, NaiveDateTime, i32)>, DbErr> {
        entity::prelude::Position::find()
            .select_only()
            .column(entity::position::Column::DriverSessionId)
            .column(entity::position::Column::Date)
            .column(entity::position::Column::Position)
            .filter(
                entity::position::Column::DriverSessionId
                    .is_in(driver_session_ids.iter().copied()),
            )
            .into_tuple::<(i32, NaiveDateTime, i32)>()
            .all(self.db)
            .await
    }

    /// Inserts position samples in batches.
    ///
    /// A failed batch statement falls back to inserting its rows one at a
    /// time, so a single bad row costs only itself rather than the whole
    /// batch. Skipped rows are logged at warn.
    ///
    /// # Arguments
    /// - `positions`: Vector of `(driver_session_id, date, position)` triples
    ///
    /// # Returns
    /// Number of rows inserted.
    pub async fn insert_many(
        &self,
        positions: Vec<(i32, NaiveDateTime, i32)>,
    ) -> Result<u64, DbErr> {
        if positions.is_empty() {
            return Ok(0);
        }

        const BATCH_SIZE: usize = 100;
        let mut inserted = 0;

        for batch in positions.chunks(BATCH_SIZE) {
            let models =
                batch
                    .iter()
                    .map(|(driver_session_id, date, position)| {
                        entity::position::ActiveModel {
                            driver_session_id: ActiveValue::Set(*driver_session_id),
                            date: ActiveValue::Set(*date),
                            position: ActiveValue::Set(*position),
                            ..Default::default()
                        }
                    });

            match entity::prelude::Position::insert_many(models)
                .exec(self.db)
                .await
            {
                Ok(_) => inserted += batch.len() as u64,
                Err(error) => {
                    tracing::warn!(
                        "Position batch insert failed, retrying rows individually: {}",
                        error
                    );
                    inserted += self.insert_fallback(batch).await;
                }
            }
        }

        Ok(inserted)
    }

    async fn insert_fallback(&self, batch: &[(i32, NaiveDateTime, i32)]) -> u64 {
        let mut inserted = 0;

        for (driver_session_id, date, position) in batch {
            let model = entity::position::ActiveModel {
                driver_session_id: ActiveValue::Set(*driver_session_id),
                date: ActiveValue::Set(*date),
                position: ActiveValue::Set(*position),
                ..Default::default()
            };

            match entity::prelude::Position::insert(model).exec(self.db).await {
                Ok(_) => inserted += 1,
                Err(error) => tracing::warn!(
                    "Skipping position sample for participation {}: {}",
                    driver_session_id,
                    error
                ),
            }
        }

        inserted
    }
}
