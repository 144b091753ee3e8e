use thiserror::Error;

/// Aggregate error for test setup and fixtures.
///
/// Application-level results are asserted on directly in tests; this type
/// only needs to cover the fallible plumbing around them.
#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Source(#[from] openf1::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
}
