use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::Error;

const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";
const DEFAULT_USER_AGENT: &str = concat!("openf1-rs/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_WINDOW_COOLDOWN: Duration = Duration::from_millis(500);
const MAX_WINDOW_COOLDOWN: Duration = Duration::from_secs(1);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the OpenF1 API.
///
/// Wraps a [`reqwest::Client`] with the retry discipline the public API
/// expects: 429 responses are retried with exponential backoff (1s, 2s, 4s by
/// default), transient transport failures consume the same retry budget, and
/// any other non-success status fails immediately with the response body
/// preserved for logging.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    initial_backoff: Duration,
    window_cooldown: Duration,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Cooldown to sleep between chunked range windows.
    pub fn window_cooldown(&self) -> Duration {
        self.window_cooldown
    }

    /// Fetch a JSON array from an API endpoint.
    ///
    /// Issues `GET {base_url}/{endpoint}` with the given query parameters and
    /// deserializes the response as a `Vec<T>`. Performs up to
    /// `1 + max_retries` attempts; only 429 responses and transport failures
    /// are retried.
    ///
    /// # Arguments
    /// - `endpoint` - Path relative to the base URL, e.g. `"sessions"`
    /// - `params` - Query parameters; OpenF1 comparison operators are part of
    ///   the key, e.g. `("date>", "2023-01-01T00:00:00+00:00")`
    ///
    /// # Returns
    /// - `Ok(Vec<T>)` - Decoded response records (empty when the API has none)
    /// - `Err(Error)` - Status, rate-limit, decode, or transport failure
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, Error> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        let max_attempts = self.max_retries + 1;
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;

        loop {
            tracing::debug!(endpoint, attempt, "requesting {}", url);

            match self.http.get(&url).query(params).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.json::<Vec<T>>().await.map_err(|source| {
                            Error::Decode {
                                endpoint: endpoint.to_string(),
                                source,
                            }
                        });
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if attempt >= max_attempts {
                            return Err(Error::RateLimitExhausted {
                                endpoint: endpoint.to_string(),
                                attempts: attempt,
                            });
                        }

                        tracing::warn!(
                            endpoint,
                            attempt,
                            backoff_ms = backoff.as_millis() as u64,
                            "rate limited, backing off before retry"
                        );
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                        attempt += 1;
                        continue;
                    }

                    // Anything else is the API telling us the request itself is
                    // wrong; keep the body for diagnostics and fail immediately.
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Status {
                        endpoint: endpoint.to_string(),
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(source) if attempt < max_attempts && is_transient(&source) => {
                    tracing::warn!(
                        endpoint,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        "transport failure, backing off before retry: {}",
                        source
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(Error::Transport {
                        endpoint: endpoint.to_string(),
                        source,
                    });
                }
            }
        }
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Builder for [`Client`].
///
/// All knobs default to values suited for the live API; tests point
/// `base_url` at a mock server and zero out the delays.
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    max_retries: u32,
    initial_backoff: Duration,
    window_cooldown: Duration,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            window_cooldown: DEFAULT_WINDOW_COOLDOWN,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Retries beyond the first attempt for 429s and transport failures.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// First backoff delay; doubles after every retried attempt.
    pub fn initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Sleep between month windows issued by the chunked range fetcher.
    ///
    /// Capped at one second: the cooldown exists to stay under the rate
    /// limit, and anything longer only slows season syncs down.
    pub fn window_cooldown(mut self, window_cooldown: Duration) -> Self {
        self.window_cooldown = window_cooldown.min(MAX_WINDOW_COOLDOWN);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(Error::Build)?;

        Ok(Client {
            http,
            base_url: self.base_url,
            max_retries: self.max_retries,
            initial_backoff: self.initial_backoff,
            window_cooldown: self.window_cooldown,
        })
    }
}
