//! Record-store backend adapter.
//!
//! `BackendClient` speaks HTTP to the record store and maps every outcome
//! onto the `ToolResult` taxonomy. `register_backend_tools` binds the
//! twelve assistant tools to their endpoints.

mod client;
mod tools;

pub use client::BackendClient;
pub use tools::{register_backend_tools, BackendTool};
