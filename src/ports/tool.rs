//! Tool Port - Interface for registry-addressable backend actions.
//!
//! A tool is a named handler that performs one authenticated action against
//! the record store and reports its outcome as a `ToolResult`. Handlers may
//! return `Err` for failures they cannot express in the taxonomy themselves;
//! the registry converts those into `TOOL_EXECUTION_ERROR` at its boundary,
//! so nothing a handler does can propagate past `ToolRegistry::execute`.

use async_trait::async_trait;

use crate::domain::{ParamMap, ToolResult, UserId};

/// Opaque handler failure, converted to `TOOL_EXECUTION_ERROR` by the registry.
pub type ToolFailure = Box<dyn std::error::Error + Send + Sync>;

/// A registry-addressable action against the record store.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable tool name (the registry key).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Executes the tool for the given identity and parameter mapping.
    ///
    /// Implementations translate backend failures into `ToolResult`
    /// values; `Err` is reserved for handler-level faults (bad parameter
    /// shapes, path construction failures) that the registry will wrap.
    async fn call(
        &self,
        identity: Option<UserId>,
        params: &ParamMap,
    ) -> Result<ToolResult, ToolFailure>;
}
