use std::time::Duration;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    constant::{TEST_MAX_RETRIES, TEST_USER_AGENT},
    error::TestError,
};

pub struct TestAppState {
    pub db: DatabaseConnection,
    pub source_client: openf1::Client,
}

pub struct TestSetup {
    pub server: ServerGuard,
    pub state: TestAppState,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    /// Create a fresh test environment: a mockito server, an OpenF1 client
    /// pointed at it with all delays zeroed, and an in-memory SQLite database
    /// with no tables yet.
    pub async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;

        let source_client = openf1::Client::builder()
            .base_url(&mock_server.url())
            .user_agent(TEST_USER_AGENT)
            .max_retries(TEST_MAX_RETRIES)
            .initial_backoff(Duration::from_millis(0))
            .window_cooldown(Duration::from_millis(0))
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            server: mock_server,
            state: TestAppState { db, source_client },
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.state.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// Calls `assert()` on all mocks created by the TestBuilder to verify
    /// they were invoked the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
