//! Application layer - orchestration over the ports.
//!
//! `ToolRegistry` owns the name-to-handler mapping, `validate_startup`
//! proves the manifest is fully registered before any traffic, and
//! `ChatHandler` turns a user message into a response envelope.

mod chat;
mod manifest;
mod messages;
mod registry;
mod startup;

pub use chat::{ChatHandler, ChatRequest};
pub use manifest::AGENT_TOOLS;
pub use registry::ToolRegistry;
pub use startup::{validate_startup, StartupError};
