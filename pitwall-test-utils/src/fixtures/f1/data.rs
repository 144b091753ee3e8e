//! Database insertion utilities for timing data fixtures.
//!
//! Helpers insert rows with deterministic values from the factory module and
//! create missing parent rows automatically (a driver session pulls in its
//! driver and session), so tests only spell out what they assert on. If a row
//! with the same natural key already exists, the existing record is returned
//! instead of creating a duplicate.

use chrono::{Duration, NaiveDateTime, Utc};
use entity::year_sync::SyncStatus;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    error::TestError,
    fixtures::f1::{factory, F1Fixtures},
};

const DEFAULT_FIXTURE_YEAR: i32 = 2023;

fn parse_wire_timestamp(value: &str) -> Result<NaiveDateTime, TestError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .map_err(|err| TestError::ParseError(format!("{value}: {err}")))
}

impl<'a> F1Fixtures<'a> {
    /// Insert a mock driver, unique by driver number.
    pub async fn insert_mock_driver(
        &self,
        driver_number: i32,
    ) -> Result<entity::driver::Model, TestError> {
        if let Some(existing) = entity::prelude::Driver::find()
            .filter(entity::driver::Column::DriverNumber.eq(driver_number))
            .one(&self.setup.state.db)
            .await?
        {
            return Ok(existing);
        }

        let record = factory::mock_driver_record(driver_number, 0);

        Ok(entity::prelude::Driver::insert(entity::driver::ActiveModel {
            driver_number: ActiveValue::Set(driver_number),
            full_name: ActiveValue::Set(record.full_name.unwrap_or_default()),
            team_name: ActiveValue::Set(record.team_name),
            team_colour: ActiveValue::Set(record.team_colour),
            country_code: ActiveValue::Set(record.country_code),
            headshot_url: ActiveValue::Set(record.headshot_url),
            is_active: ActiveValue::Set(true),
            last_updated: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    /// Insert a mock session, unique by session key.
    pub async fn insert_mock_session(
        &self,
        session_key: i32,
        year: i32,
        session_type: &str,
        session_name: &str,
    ) -> Result<entity::session::Model, TestError> {
        if let Some(existing) = entity::prelude::Session::find()
            .filter(entity::session::Column::SessionKey.eq(session_key))
            .one(&self.setup.state.db)
            .await?
        {
            return Ok(existing);
        }

        let record = factory::mock_session_record(session_key, year, session_type, session_name);
        let date_start = parse_wire_timestamp(record.date_start.as_deref().unwrap_or_default())?;
        let date_end = match record.date_end.as_deref() {
            Some(raw) => Some(parse_wire_timestamp(raw)?),
            None => None,
        };

        Ok(
            entity::prelude::Session::insert(entity::session::ActiveModel {
                session_key: ActiveValue::Set(session_key),
                session_name: ActiveValue::Set(session_name.to_string()),
                session_type: ActiveValue::Set(session_type.to_string()),
                date_start: ActiveValue::Set(date_start),
                date_end: ActiveValue::Set(date_end),
                gmt_offset: ActiveValue::Set(record.gmt_offset),
                meeting_key: ActiveValue::Set(record.meeting_key),
                location: ActiveValue::Set(record.location),
                country_name: ActiveValue::Set(record.country_name),
                circuit_short_name: ActiveValue::Set(record.circuit_short_name),
                year: ActiveValue::Set(year),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Insert a mock driver session link with a race result.
    ///
    /// The driver and session are created automatically if missing; an
    /// auto-created session is a 2023 race. If the link already exists it is
    /// returned unchanged, so set results on the first insertion.
    pub async fn insert_mock_driver_session(
        &self,
        driver_number: i32,
        session_key: i32,
        final_position: Option<i32>,
        fastest_lap: bool,
    ) -> Result<entity::driver_session::Model, TestError> {
        let driver = self.insert_mock_driver(driver_number).await?;
        let session = self
            .insert_mock_session(session_key, DEFAULT_FIXTURE_YEAR, "Race", "Race")
            .await?;

        if let Some(existing) = entity::prelude::DriverSession::find()
            .filter(entity::driver_session::Column::DriverId.eq(driver.id))
            .filter(entity::driver_session::Column::SessionId.eq(session.id))
            .one(&self.setup.state.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(entity::prelude::DriverSession::insert(
            entity::driver_session::ActiveModel {
                driver_id: ActiveValue::Set(driver.id),
                session_id: ActiveValue::Set(session.id),
                final_position: ActiveValue::Set(final_position),
                fastest_lap: ActiveValue::Set(fastest_lap),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    /// Insert a mock position sample, creating the driver session if needed.
    pub async fn insert_mock_position(
        &self,
        driver_number: i32,
        session_key: i32,
        date: NaiveDateTime,
        position: i32,
    ) -> Result<entity::position::Model, TestError> {
        let driver_session = self
            .insert_mock_driver_session(driver_number, session_key, None, false)
            .await?;

        Ok(
            entity::prelude::Position::insert(entity::position::ActiveModel {
                driver_session_id: ActiveValue::Set(driver_session.id),
                date: ActiveValue::Set(date),
                position: ActiveValue::Set(position),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Insert a mock lap, creating the driver session if needed.
    pub async fn insert_mock_lap(
        &self,
        driver_number: i32,
        session_key: i32,
        lap_number: i32,
        lap_time: Option<f64>,
    ) -> Result<entity::lap::Model, TestError> {
        let driver_session = self
            .insert_mock_driver_session(driver_number, session_key, None, false)
            .await?;

        Ok(entity::prelude::Lap::insert(entity::lap::ActiveModel {
            driver_session_id: ActiveValue::Set(driver_session.id),
            lap_number: ActiveValue::Set(lap_number),
            lap_time: ActiveValue::Set(lap_time),
            lap_time_string: ActiveValue::Set(None),
            is_fastest: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    /// Insert a mock year sync row in the given status.
    ///
    /// An in-progress row carries a fresh lease, which blocks concurrent
    /// sync attempts for that year.
    pub async fn insert_mock_year_sync(
        &self,
        year: i32,
        status: SyncStatus,
    ) -> Result<entity::year_sync::Model, TestError> {
        if let Some(existing) = entity::prelude::YearSync::find()
            .filter(entity::year_sync::Column::Year.eq(year))
            .one(&self.setup.state.db)
            .await?
        {
            return Ok(existing);
        }

        let progress = match status {
            SyncStatus::Completed => 100,
            _ => 0,
        };
        let (lease_owner, lease_acquired_at) = match status {
            SyncStatus::InProgress => (
                Some("fixture".to_string()),
                Some(Utc::now().naive_utc()),
            ),
            _ => (None, None),
        };

        Ok(
            entity::prelude::YearSync::insert(entity::year_sync::ActiveModel {
                year: ActiveValue::Set(year),
                status: ActiveValue::Set(status),
                progress: ActiveValue::Set(progress),
                message: ActiveValue::Set(None),
                last_synced: ActiveValue::Set(None),
                last_incremental_sync: ActiveValue::Set(None),
                drivers_count: ActiveValue::Set(None),
                sessions_count: ActiveValue::Set(None),
                lease_owner: ActiveValue::Set(lease_owner),
                lease_acquired_at: ActiveValue::Set(lease_acquired_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Insert an in-progress year sync whose lease went stale the given
    /// number of minutes ago.
    pub async fn insert_mock_stale_year_sync(
        &self,
        year: i32,
        minutes_ago: i64,
    ) -> Result<entity::year_sync::Model, TestError> {
        let acquired_at = Utc::now().naive_utc() - Duration::minutes(minutes_ago);

        Ok(
            entity::prelude::YearSync::insert(entity::year_sync::ActiveModel {
                year: ActiveValue::Set(year),
                status: ActiveValue::Set(SyncStatus::InProgress),
                progress: ActiveValue::Set(40),
                message: ActiveValue::Set(Some("Processing drivers...".to_string())),
                last_synced: ActiveValue::Set(None),
                last_incremental_sync: ActiveValue::Set(None),
                drivers_count: ActiveValue::Set(None),
                sessions_count: ActiveValue::Set(None),
                lease_owner: ActiveValue::Set(Some("crashed-runner".to_string())),
                lease_acquired_at: ActiveValue::Set(Some(acquired_at)),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
