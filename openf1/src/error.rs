use thiserror::Error;

/// Errors produced by the OpenF1 client.
///
/// Every variant carries the endpoint it occurred on so callers can log
/// failures with enough context to replay them by hand.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-success, non-429 HTTP status. These are terminal: the API rejected
    /// the request outright and retrying the same request will not help.
    #[error("request to {endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The API kept returning 429 after every backoff attempt was spent.
    #[error("rate limit persisted on {endpoint} after {attempts} attempts")]
    RateLimitExhausted { endpoint: String, attempts: u32 },
    /// The response body was not the expected JSON array.
    #[error("failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// Connection or timeout failure that survived the retry budget.
    #[error("transport error on {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    /// A date range that cannot be split into month windows.
    #[error("invalid date range: {0}")]
    InvalidRange(String),
}
