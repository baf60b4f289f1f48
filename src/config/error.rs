//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Gemini API key is empty")]
    EmptyApiKey,

    #[error("Gemini API key looks like a placeholder: {0}")]
    PlaceholderApiKey(String),

    #[error("Gemini API key format invalid: expected an 'AIza'-prefixed key of at least {expected_len} characters, got {actual_len}")]
    MalformedApiKey {
        expected_len: usize,
        actual_len: usize,
    },

    #[error("Backend base URL must start with http:// or https://: {0}")]
    InvalidBackendUrl(String),

    #[error("Timeout must be between {min} and {max} seconds, got {actual}")]
    TimeoutOutOfRange { min: u64, max: u64, actual: u64 },

    #[error("Max retries must be between {min} and {max}, got {actual}")]
    RetriesOutOfRange { min: u32, max: u32, actual: u32 },

    #[error("Retry delay must be between {min} and {max} milliseconds, got {actual}")]
    RetryDelayOutOfRange { min: u64, max: u64, actual: u64 },

    #[error("History window must be at least 1, got {0}")]
    InvalidHistoryWindow(usize),

    #[error("Max message length must be at least 1, got {0}")]
    InvalidMaxMessageLen(usize),
}
