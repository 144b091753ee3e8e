//! Environment-driven application configuration.

use std::time::Duration;

use crate::error::config::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://pitwall.db?mode=rwc";
const DEFAULT_USER_AGENT: &str = concat!("pitwall/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;
const DEFAULT_WINDOW_COOLDOWN_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LEASE_TIMEOUT_MINS: i64 = 30;
const DEFAULT_AUTO_SYNC_CRON: &str = "0 0 */6 * * *";

/// Application configuration loaded from environment variables.
///
/// Every value has a default suitable for local development, so a bare environment
/// starts against a SQLite file database and the public OpenF1 API.
pub struct Config {
    /// Database connection URL.
    pub database_url: String,
    /// Override for the OpenF1 API base URL, `None` uses the public API.
    pub source_base_url: Option<String>,
    /// User agent sent with every OpenF1 request.
    pub user_agent: String,
    /// Maximum retries for rate-limited or transient request failures.
    pub max_retries: u32,
    /// Initial backoff delay, doubled after each rate-limited attempt.
    pub initial_backoff: Duration,
    /// Cooldown between consecutive date-window requests.
    pub window_cooldown: Duration,
    /// Per-request timeout for OpenF1 calls.
    pub request_timeout: Duration,
    /// Minutes after which an in-progress sync lease is considered abandoned.
    pub lease_timeout_mins: i64,
    /// Cron expression for automatic current-season syncs, every six hours by
    /// default. `None` disables them.
    pub auto_sync_cron: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            source_base_url: env_opt("OPENF1_BASE_URL"),
            user_agent: env_or("OPENF1_USER_AGENT", DEFAULT_USER_AGENT),
            max_retries: parse_var("SYNC_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            initial_backoff: Duration::from_millis(parse_var(
                "SYNC_INITIAL_BACKOFF_MS",
                DEFAULT_INITIAL_BACKOFF_MS,
            )?),
            window_cooldown: Duration::from_millis(parse_var(
                "SYNC_WINDOW_COOLDOWN_MS",
                DEFAULT_WINDOW_COOLDOWN_MS,
            )?),
            request_timeout: Duration::from_secs(parse_var(
                "SYNC_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            lease_timeout_mins: parse_var("SYNC_LEASE_TIMEOUT_MINS", DEFAULT_LEASE_TIMEOUT_MINS)?,
            auto_sync_cron: cron_var("AUTO_SYNC_CRON", DEFAULT_AUTO_SYNC_CRON),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

/// Reads a cron schedule variable; an empty value or `off` disables the schedule.
fn cron_var(var: &str, default: &str) -> Option<String> {
    let value = env_or(var, default);
    if value.is_empty() || value.eq_ignore_ascii_case("off") {
        return None;
    }

    Some(value)
}

fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: err.to_string(),
            }),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: err.to_string(),
        }),
    }
}
