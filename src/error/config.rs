use thiserror::Error;

/// Configuration errors raised while loading environment variables.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but could not be parsed.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Name of the offending environment variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}
