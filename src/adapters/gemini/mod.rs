//! Gemini generative-language adapter.
//!
//! `GeminiProvider` implements the model port against the Generative
//! Language API with bounded linear-backoff retries. `MockModelProvider`
//! is the scripted test double.

mod mock;
mod provider;

pub use mock::MockModelProvider;
pub use provider::GeminiProvider;
