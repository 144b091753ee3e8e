use sea_orm::DatabaseConnection;

/// Shared runtime state handed to the scheduler and services.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,
    /// OpenF1 API client.
    pub source_client: openf1::Client,
}
