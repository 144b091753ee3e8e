//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use entity::year_sync::SyncStatus;
use mockito::Mock;
use openf1::model::{DriverRecord, LapRecord, PositionRecord, SessionRecord};
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestSetup};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// timing data fixtures, and mock HTTP endpoints. Methods can be chained together
/// and finalized with `build()` to create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,

    // Database fixtures to insert
    drivers: Vec<i32>,
    sessions: Vec<(i32, i32, String, String)>, // (session_key, year, session_type, session_name)
    driver_sessions: Vec<(i32, i32, Option<i32>, bool)>, // (driver_number, session_key, final_position, fastest_lap)
    year_syncs: Vec<(i32, SyncStatus)>,

    // Mock endpoints to create; custom mocks are registered before the
    // pre-configured shortcuts
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    sessions_endpoints: Vec<(i32, Vec<SessionRecord>, usize)>, // (year, records, expected_requests)
    drivers_endpoints: Vec<(i32, Vec<DriverRecord>, usize)>,
    position_endpoints: Vec<(Vec<PositionRecord>, usize)>,
    laps_endpoints: Vec<(Vec<LapRecord>, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            drivers: Vec::new(),
            sessions: Vec::new(),
            driver_sessions: Vec::new(),
            year_syncs: Vec::new(),
            mock_builders: Vec::new(),
            sessions_endpoints: Vec::new(),
            drivers_endpoints: Vec::new(),
            position_endpoints: Vec::new(),
            laps_endpoints: Vec::new(),
        }
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pitwall_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), pitwall_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Driver)
    ///     .with_table(Session)
    ///     .with_table(DriverSession)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add every table the sync pipeline touches.
    ///
    /// Creates Driver, Session, DriverSession, Position, Lap, YearSync, and
    /// SessionKeyCache, in dependency order.
    pub fn with_sync_tables(self) -> Self {
        self.with_table(entity::prelude::Driver)
            .with_table(entity::prelude::Session)
            .with_table(entity::prelude::DriverSession)
            .with_table(entity::prelude::Position)
            .with_table(entity::prelude::Lap)
            .with_table(entity::prelude::YearSync)
            .with_table(entity::prelude::SessionKeyCache)
    }

    /// Add the derived statistics tables.
    ///
    /// Creates DriverStats, ConstructorStats, and DriverSessionStats. Chain
    /// after `with_sync_tables` when a test exercises the stats refresh.
    pub fn with_stats_tables(self) -> Self {
        self.with_table(entity::prelude::DriverStats)
            .with_table(entity::prelude::ConstructorStats)
            .with_table(entity::prelude::DriverSessionStats)
    }

    /// Insert a mock driver into the database during `build()`.
    pub fn with_mock_driver(mut self, driver_number: i32) -> Self {
        self.drivers.push(driver_number);
        self
    }

    /// Insert a mock session into the database during `build()`.
    pub fn with_mock_session(
        mut self,
        session_key: i32,
        year: i32,
        session_type: &str,
        session_name: &str,
    ) -> Self {
        self.sessions.push((
            session_key,
            year,
            session_type.to_string(),
            session_name.to_string(),
        ));
        self
    }

    /// Insert a mock driver session link during `build()`.
    ///
    /// Missing parent rows are created automatically; an auto-created session
    /// is a 2023 race. Queue the session first via `with_mock_session` to
    /// control its year, type, or name.
    pub fn with_mock_driver_session(
        mut self,
        driver_number: i32,
        session_key: i32,
        final_position: Option<i32>,
        fastest_lap: bool,
    ) -> Self {
        self.driver_sessions
            .push((driver_number, session_key, final_position, fastest_lap));
        self
    }

    /// Insert a mock year sync row during `build()`.
    pub fn with_mock_year_sync(mut self, year: i32, status: SyncStatus) -> Self {
        self.year_syncs.push((year, status));
        self
    }

    /// Add a custom mock endpoint to the test server.
    ///
    /// The closure receives the mockito server and returns the created mock,
    /// which will be verified via `assert_mocks()`. Custom endpoints are
    /// registered before the typed endpoint shortcuts.
    pub fn with_mock_endpoint<F>(mut self, mock_builder: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(mock_builder));
        self
    }

    /// Add a mock session-listing endpoint for a year.
    pub fn with_sessions_endpoint(
        mut self,
        year: i32,
        records: Vec<SessionRecord>,
        expected_requests: usize,
    ) -> Self {
        self.sessions_endpoints.push((year, records, expected_requests));
        self
    }

    /// Add a mock driver-roster endpoint for a session.
    pub fn with_drivers_endpoint(
        mut self,
        session_key: i32,
        records: Vec<DriverRecord>,
        expected_requests: usize,
    ) -> Self {
        self.drivers_endpoints
            .push((session_key, records, expected_requests));
        self
    }

    /// Add a mock position endpoint answering every month window.
    pub fn with_position_endpoint(
        mut self,
        records: Vec<PositionRecord>,
        expected_requests: usize,
    ) -> Self {
        self.position_endpoints.push((records, expected_requests));
        self
    }

    /// Add a mock laps endpoint answering every month window.
    pub fn with_laps_endpoint(
        mut self,
        records: Vec<LapRecord>,
        expected_requests: usize,
    ) -> Self {
        self.laps_endpoints.push((records, expected_requests));
        self
    }

    /// Execute all queued operations and create the test environment.
    ///
    /// Runs in order: table creation, database fixtures, custom mock
    /// endpoints, then typed endpoint shortcuts. Returns a `TestSetup` whose
    /// `mocks` hold every registered endpoint for `assert_mocks()`.
    pub async fn build(self) -> Result<TestSetup, TestError> {
        let mut setup = TestSetup::new().await?;

        setup.with_tables(self.tables).await?;

        for driver_number in self.drivers {
            setup.f1().insert_mock_driver(driver_number).await?;
        }
        for (session_key, year, session_type, session_name) in self.sessions {
            setup
                .f1()
                .insert_mock_session(session_key, year, &session_type, &session_name)
                .await?;
        }
        for (driver_number, session_key, final_position, fastest_lap) in self.driver_sessions {
            setup
                .f1()
                .insert_mock_driver_session(driver_number, session_key, final_position, fastest_lap)
                .await?;
        }
        for (year, status) in self.year_syncs {
            setup.f1().insert_mock_year_sync(year, status).await?;
        }

        let mut mocks = Vec::new();
        for mock_builder in self.mock_builders {
            mocks.push(mock_builder(&mut setup.server));
        }
        for (year, records, expected_requests) in self.sessions_endpoints {
            mocks.push(setup.f1().create_sessions_endpoint(year, records, expected_requests));
        }
        for (session_key, records, expected_requests) in self.drivers_endpoints {
            mocks.push(setup.f1().create_drivers_endpoint(
                session_key,
                records,
                expected_requests,
            ));
        }
        for (records, expected_requests) in self.position_endpoints {
            mocks.push(setup.f1().create_position_endpoint(records, expected_requests));
        }
        for (records, expected_requests) in self.laps_endpoints {
            mocks.push(setup.f1().create_laps_endpoint(records, expected_requests));
        }
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
