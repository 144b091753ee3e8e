use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry later (transient upstream or connection problems)
    Retry,
    /// Failed permanently (bad request or bad data)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    ///
    /// The sync orchestrator uses this to decide whether a failed season sync is recorded
    /// as `incomplete` (retryable, partial data kept) or `error` (needs investigation).
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            // OpenF1 request errors - rate limiting, transport issues, bad requests
            Error::SourceError(source_err) => match source_err {
                // Retries inside the client were exhausted, the API will recover
                // once request pressure drops
                openf1::Error::RateLimitExhausted { .. } => ErrorRetryStrategy::Retry,

                // Network error or connection issue - should retry
                openf1::Error::Transport { .. } => ErrorRetryStrategy::Retry,

                // 500 - the API is temporarily unavailable, backoff and retry later
                openf1::Error::Status { status, .. } if *status >= 500 => ErrorRetryStrategy::Retry,

                // 400 - we're making invalid requests to the API, this is a flaw in
                // the code that needs to be fixed
                //
                // Decode and builder errors are likewise permanent.
                _ => ErrorRetryStrategy::Fail,
            },

            Self::DbErr(db_err) => {
                match db_err {
                    // Connection acquisition errors - transient, should retry
                    DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                    // Connection errors - transient, should retry
                    DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                    // All other database errors are permanent failures:
                    // - Query errors (constraint violations, syntax errors, etc.)
                    // - Type conversion errors
                    // - Schema/migration errors
                    // - Record not found/inserted/updated
                    // These indicate programming bugs or data issues that won't resolve with retry
                    _ => ErrorRetryStrategy::Fail,
                }
            }

            // Configuration errors - permanent failures, won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Sync errors - permanent failures (lease conflicts resolve via lease
            // expiry, empty seasons won't fill in on retry)
            Self::SyncError(_) => ErrorRetryStrategy::Fail,

            // Parse errors - permanent failures (bad data format)
            Self::ParseError(_) => ErrorRetryStrategy::Fail,

            // InternalError - permanent failures (internal error within Pitwall's code)
            Self::InternalError(_) => ErrorRetryStrategy::Fail,

            // Job scheduler errors - permanent failures (configuration issue)
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
