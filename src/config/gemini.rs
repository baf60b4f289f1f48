//! Gemini model API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Placeholder values people paste from setup docs instead of a real key.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your-gemini-api-key",
    "your-api-key-here",
    "placeholder",
    "xxx",
];

/// Configuration for the Gemini model client.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key (starts with "AIza")
    pub api_key: Secret<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (scaled by attempt number)
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl GeminiConfig {
    /// Creates a configuration with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base retry delay.
    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Get per-attempt timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Exposes the API key (for building requests).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate Gemini configuration
    ///
    /// Checks the API key shape (non-empty, not a placeholder, "AIza"
    /// prefix, plausible length) and that the retry knobs are in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }

        if PLACEHOLDER_KEYS.contains(&key.to_lowercase().as_str()) {
            return Err(ValidationError::PlaceholderApiKey(key.clone()));
        }

        if !key.starts_with("AIza") || key.len() < 35 {
            return Err(ValidationError::MalformedApiKey {
                expected_len: 35,
                actual_len: key.len(),
            });
        }

        if !(5..=300).contains(&self.timeout_secs) {
            return Err(ValidationError::TimeoutOutOfRange {
                min: 5,
                max: 300,
                actual: self.timeout_secs,
            });
        }

        if self.max_retries > 5 {
            return Err(ValidationError::RetriesOutOfRange {
                min: 0,
                max: 5,
                actual: self.max_retries,
            });
        }

        if !(100..=10_000).contains(&self.retry_delay_ms) {
            return Err(ValidationError::RetryDelayOutOfRange {
                min: 100,
                max: 10_000,
                actual: self.retry_delay_ms,
            });
        }

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    1_000
}
