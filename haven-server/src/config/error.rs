//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read or deserialized.
    #[error("configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),

    /// Values loaded but are not usable.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value is missing or blank; carries the variable name.
    #[error("required configuration missing: {0}")]
    MissingRequired(&'static str),

    /// Port 0.
    #[error("invalid port number")]
    InvalidPort,

    /// Request deadline outside 1..=600 seconds.
    #[error("invalid request timeout")]
    InvalidTimeout,

    /// Iteration ceiling of zero.
    #[error("max_iterations must be at least 1")]
    InvalidMaxIterations,

    /// Sampling temperature outside 0.0..=2.0.
    #[error("temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    /// A base URL that is not http(s).
    #[error("invalid base URL for {0}")]
    InvalidBaseUrl(&'static str),
}
