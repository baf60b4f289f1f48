//! Adapters - Concrete implementations of the ports.
//!
//! Adapters translate between the core's domain types and external systems:
//! the record-store HTTP API and the Gemini generative-language API.

pub mod backend;
pub mod gemini;
