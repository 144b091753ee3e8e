use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::NullOrdering, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder,
};

/// A per-driver session result row ready for insertion.
#[derive(Clone, Debug)]
pub struct SessionResultInsert {
    /// Driver's permanent car number.
    pub driver_number: i32,
    /// Driver's full name at refresh time.
    pub full_name: String,
    /// Driver's team at refresh time.
    pub team_name: Option<String>,
    /// Upstream session key.
    pub session_key: i32,
    /// Session display name.
    pub session_name: String,
    /// Session category.
    pub session_type: String,
    /// Circuit location.
    pub location: Option<String>,
    /// Session start in naive UTC.
    pub date_start: NaiveDateTime,
    /// Final classified position, when known.
    pub final_position: Option<i32>,
    /// Whether the driver set the session's fastest lap.
    pub fastest_lap: bool,
    /// Championship points awarded for the result.
    pub points: i32,
    /// Season the session belongs to.
    pub year: i32,
}

/// Repository for derived statistics tables.
///
/// Statistics are pure recomputations: each refresh deletes a season's partition and
/// rewrites it, so the replace methods are expected to run inside one transaction.
pub struct StatsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatsRepository<'a, C> {
    /// Creates a new instance of [`StatsRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces the per-driver season statistics for a year.
    pub async fn replace_driver_stats(
        &self,
        year: i32,
        rows: Vec<entity::driver_stats::Model>,
    ) -> Result<(), DbErr> {
        entity::prelude::DriverStats::delete_many()
            .filter(entity::driver_stats::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        if rows.is_empty() {
            return Ok(());
        }

        let rows = rows.into_iter().map(|row| row.into_active_model());

        entity::prelude::DriverStats::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the per-constructor season statistics for a year.
    pub async fn replace_constructor_stats(
        &self,
        year: i32,
        rows: Vec<entity::constructor_stats::Model>,
    ) -> Result<(), DbErr> {
        entity::prelude::ConstructorStats::delete_many()
            .filter(entity::constructor_stats::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        if rows.is_empty() {
            return Ok(());
        }

        let rows = rows.into_iter().map(|row| row.into_active_model());

        entity::prelude::ConstructorStats::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the per-driver session results for a year.
    pub async fn replace_session_results(
        &self,
        year: i32,
        rows: Vec<SessionResultInsert>,
    ) -> Result<(), DbErr> {
        entity::prelude::DriverSessionStats::delete_many()
            .filter(entity::driver_session_stats::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        if rows.is_empty() {
            return Ok(());
        }

        const BATCH_SIZE: usize = 100;

        for batch in rows.chunks(BATCH_SIZE) {
            let models =
                batch
                    .iter()
                    .cloned()
                    .map(|row| entity::driver_session_stats::ActiveModel {
                        driver_number: ActiveValue::Set(row.driver_number),
                        full_name: ActiveValue::Set(row.full_name),
                        team_name: ActiveValue::Set(row.team_name),
                        session_key: ActiveValue::Set(row.session_key),
                        session_name: ActiveValue::Set(row.session_name),
                        session_type: ActiveValue::Set(row.session_type),
                        location: ActiveValue::Set(row.location),
                        date_start: ActiveValue::Set(row.date_start),
                        final_position: ActiveValue::Set(row.final_position),
                        fastest_lap: ActiveValue::Set(row.fastest_lap),
                        points: ActiveValue::Set(row.points),
                        year: ActiveValue::Set(row.year),
                        ..Default::default()
                    });

            entity::prelude::DriverSessionStats::insert_many(models)
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    /// Fetches the driver standings for a season, championship order.
    pub async fn get_driver_stats(
        &self,
        year: i32,
    ) -> Result<Vec<entity::driver_stats::Model>, DbErr> {
        entity::prelude::DriverStats::find()
            .filter(entity::driver_stats::Column::Year.eq(year))
            .order_by_asc(entity::driver_stats::Column::Position)
            .all(self.db)
            .await
    }

    /// Fetches the constructor standings for a season, championship order.
    pub async fn get_constructor_stats(
        &self,
        year: i32,
    ) -> Result<Vec<entity::constructor_stats::Model>, DbErr> {
        entity::prelude::ConstructorStats::find()
            .filter(entity::constructor_stats::Column::Year.eq(year))
            .order_by_asc(entity::constructor_stats::Column::Position)
            .all(self.db)
            .await
    }

    /// Fetches a driver's session results for a season in calendar order.
    pub async fn get_session_results(
        &self,
        driver_number: i32,
        year: i32,
    ) -> Result<Vec<entity::driver_session_stats::Model>, DbErr> {
        entity::prelude::DriverSessionStats::find()
            .filter(entity::driver_session_stats::Column::DriverNumber.eq(driver_number))
            .filter(entity::driver_session_stats::Column::Year.eq(year))
            .order_by_asc(entity::driver_session_stats::Column::DateStart)
            .all(self.db)
            .await
    }

    /// Fetches one session's full classification, best placed first.
    ///
    /// Unclassified entries sort after placed ones, then by car number so the
    /// order stays stable across refreshes.
    pub async fn get_by_session_key(
        &self,
        session_key: i32,
    ) -> Result<Vec<entity::driver_session_stats::Model>, DbErr> {
        entity::prelude::DriverSessionStats::find()
            .filter(entity::driver_session_stats::Column::SessionKey.eq(session_key))
            .order_by_with_nulls(
                entity::driver_session_stats::Column::FinalPosition,
                Order::Asc,
                NullOrdering::Last,
            )
            .order_by_asc(entity::driver_session_stats::Column::DriverNumber)
            .all(self.db)
            .await
    }
}
