use migration::{CaseStatement, Expr};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

/// Repository for driver participation links between drivers and sessions.
///
/// Uniqueness of the `(driver_id, session_id)` pair is enforced by callers checking
/// [`DriverSessionRepository::find_links`] before inserting; the production schema
/// additionally carries a unique index as a safety net.
pub struct DriverSessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DriverSessionRepository<'a, C> {
    /// Creates a new instance of [`DriverSessionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches `(id, driver_id, session_id)` triples for the given sessions.
    pub async fn find_links(
        &self,
        session_ids: &[i32],
    ) -> Result<Vec<(i32, i32, i32)>, DbErr> {
        entity::prelude::DriverSession::find()
            .select_only()
            .column(entity::driver_session::Column::Id)
            .column(entity::driver_session::Column::DriverId)
            .column(entity::driver_session::Column::SessionId)
            .filter(entity::driver_session::Column::SessionId.is_in(session_ids.iter().copied()))
            .into_tuple::<(i32, i32, i32)>()
            .all(self.db)
            .await
    }

    /// Inserts new participation links.
    ///
    /// # Arguments
    /// - `links`: Vector of `(driver_id, session_id)` pairs, assumed not to exist yet
    pub async fn insert_many(
        &self,
        links: Vec<(i32, i32)>,
    ) -> Result<Vec<entity::driver_session::Model>, DbErr> {
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let links = links
            .into_iter()
            .map(|(driver_id, session_id)| entity::driver_session::ActiveModel {
                driver_id: ActiveValue::Set(driver_id),
                session_id: ActiveValue::Set(session_id),
                final_position: ActiveValue::Set(None),
                fastest_lap: ActiveValue::Set(false),
                ..Default::default()
            });

        entity::prelude::DriverSession::insert_many(links)
            .exec_with_returning(self.db)
            .await
    }

    /// Sets final positions for participations that do not have one yet.
    ///
    /// Rows whose `final_position` is already set are left untouched, so a position
    /// recorded by an earlier sync is never silently overwritten.
    ///
    /// # Arguments
    /// - `positions`: Vector of `(driver_session_id, final_position)` pairs
    ///
    /// # Returns
    /// Number of rows that received a final position.
    pub async fn set_final_positions(
        &self,
        positions: Vec<(i32, i32)>,
    ) -> Result<u64, DbErr> {
        if positions.is_empty() {
            return Ok(0);
        }

        const BATCH_SIZE: usize = 100;
        let mut updated = 0;

        for batch in positions.chunks(BATCH_SIZE) {
            let mut case_stmt = CaseStatement::new();
            let link_ids: Vec<i32> = batch.iter().map(|(id, _)| *id).collect();

            for (link_id, final_position) in batch {
                case_stmt = case_stmt.case(
                    entity::driver_session::Column::Id.eq(*link_id),
                    Expr::value(*final_position),
                );
            }

            let result = entity::prelude::DriverSession::update_many()
                .col_expr(
                    entity::driver_session::Column::FinalPosition,
                    Expr::value(case_stmt),
                )
                .filter(entity::driver_session::Column::Id.is_in(link_ids))
                .filter(entity::driver_session::Column::FinalPosition.is_null())
                .exec(self.db)
                .await?;

            updated += result.rows_affected;
        }

        Ok(updated)
    }

    /// Sets final positions for the given participations, replacing any value
    /// already stored.
    ///
    /// This is the explicit-recomputation path; routine syncs go through
    /// [`DriverSessionRepository::set_final_positions`], which only fills gaps.
    ///
    /// # Arguments
    /// - `positions`: Vector of `(driver_session_id, final_position)` pairs
    ///
    /// # Returns
    /// Number of rows updated.
    pub async fn overwrite_final_positions(
        &self,
        positions: Vec<(i32, i32)>,
    ) -> Result<u64, DbErr> {
        if positions.is_empty() {
            return Ok(0);
        }

        const BATCH_SIZE: usize = 100;
        let mut updated = 0;

        for batch in positions.chunks(BATCH_SIZE) {
            let mut case_stmt = CaseStatement::new();
            let link_ids: Vec<i32> = batch.iter().map(|(id, _)| *id).collect();

            for (link_id, final_position) in batch {
                case_stmt = case_stmt.case(
                    entity::driver_session::Column::Id.eq(*link_id),
                    Expr::value(*final_position),
                );
            }

            let result = entity::prelude::DriverSession::update_many()
                .col_expr(
                    entity::driver_session::Column::FinalPosition,
                    Expr::value(case_stmt),
                )
                .filter(entity::driver_session::Column::Id.is_in(link_ids))
                .exec(self.db)
                .await?;

            updated += result.rows_affected;
        }

        Ok(updated)
    }

    /// Clears the fastest lap flag for every participation in the given sessions.
    pub async fn reset_fastest_laps(&self, session_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::DriverSession::update_many()
            .col_expr(
                entity::driver_session::Column::FastestLap,
                Expr::value(false),
            )
            .filter(entity::driver_session::Column::SessionId.is_in(session_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a single participation as holding the session's fastest lap.
    pub async fn mark_fastest_lap(&self, driver_session_id: i32) -> Result<(), DbErr> {
        entity::prelude::DriverSession::update_many()
            .col_expr(entity::driver_session::Column::FastestLap, Expr::value(true))
            .filter(entity::driver_session::Column::Id.eq(driver_session_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Fetches full participation models for the given sessions.
    pub async fn find_by_session_ids(
        &self,
        session_ids: &[i32],
    ) -> Result<Vec<entity::driver_session::Model>, DbErr> {
        entity::prelude::DriverSession::find()
            .filter(entity::driver_session::Column::SessionId.is_in(session_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Fetches the distinct driver ids participating in the given sessions.
    pub async fn get_distinct_driver_ids(&self, session_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        entity::prelude::DriverSession::find()
            .select_only()
            .column(entity::driver_session::Column::DriverId)
            .distinct()
            .filter(entity::driver_session::Column::SessionId.is_in(session_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
