use chrono::Utc;
use migration::OnConflict;
use openf1::model::DriverRecord;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

/// Repository for driver records keyed by permanent car number.
pub struct DriverRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DriverRepository<'a, C> {
    /// Creates a new instance of [`DriverRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or updates drivers by car number.
    ///
    /// Profile fields are overwritten with the provided values so a driver's team always
    /// reflects the most recent session they appeared in. Drivers seen during a sync are
    /// re-marked active.
    ///
    /// # Arguments
    /// - `drivers`: Vector of a tuple containing the car number and the API driver record
    pub async fn upsert_many(
        &self,
        drivers: Vec<(i32, DriverRecord)>,
    ) -> Result<Vec<entity::driver::Model>, DbErr> {
        if drivers.is_empty() {
            return Ok(Vec::new());
        }

        let drivers = drivers.into_iter().map(|(driver_number, driver)| {
            let full_name = driver
                .full_name
                .unwrap_or_else(|| format!("Driver {driver_number}"));

            entity::driver::ActiveModel {
                driver_number: ActiveValue::Set(driver_number),
                full_name: ActiveValue::Set(full_name),
                team_name: ActiveValue::Set(driver.team_name),
                team_colour: ActiveValue::Set(driver.team_colour),
                country_code: ActiveValue::Set(driver.country_code),
                headshot_url: ActiveValue::Set(driver.headshot_url),
                is_active: ActiveValue::Set(true),
                last_updated: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            }
        });

        entity::prelude::Driver::insert_many(drivers)
            .on_conflict(
                OnConflict::column(entity::driver::Column::DriverNumber)
                    .update_columns([
                        entity::driver::Column::FullName,
                        entity::driver::Column::TeamName,
                        entity::driver::Column::TeamColour,
                        entity::driver::Column::CountryCode,
                        entity::driver::Column::HeadshotUrl,
                        entity::driver::Column::IsActive,
                        entity::driver::Column::LastUpdated,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Fetches `(id, driver_number)` pairs for the given car numbers.
    pub async fn get_ids_by_driver_numbers(
        &self,
        driver_numbers: &[i32],
    ) -> Result<Vec<(i32, i32)>, DbErr> {
        entity::prelude::Driver::find()
            .select_only()
            .column(entity::driver::Column::Id)
            .column(entity::driver::Column::DriverNumber)
            .filter(entity::driver::Column::DriverNumber.is_in(driver_numbers.iter().copied()))
            .into_tuple::<(i32, i32)>()
            .all(self.db)
            .await
    }

    /// Fetches full driver models by record id.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<entity::driver::Model>, DbErr> {
        entity::prelude::Driver::find()
            .filter(entity::driver::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Counts all stored drivers.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Driver::find().count(self.db).await
    }
}
