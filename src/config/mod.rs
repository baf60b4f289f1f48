//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `SALAATFLOW` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use salaat_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod backend;
mod chat;
mod error;
mod gemini;

pub use backend::BackendConfig;
pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use gemini::GeminiConfig;

use serde::Deserialize;

/// Root configuration for the assistant core.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Record-store backend (base URL, timeout)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Gemini model API (key, model, retry policy)
    pub gemini: GeminiConfig,

    /// Chat orchestration knobs (history window, message length)
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present (development), then reads variables
    /// with the `SALAATFLOW` prefix, `__` separating nested values:
    ///
    /// - `SALAATFLOW__GEMINI__API_KEY=AIza...` -> `gemini.api_key`
    /// - `SALAATFLOW__BACKEND__BASE_URL=...` -> `backend.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SALAATFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any section holds an invalid value
    /// (placeholder API key, out-of-range timeout, etc.).
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.gemini.validate()?;
        self.chat.validate()?;
        Ok(())
    }
}
