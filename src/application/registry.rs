//! Tool registry - the single dispatch table for tool invocations.
//!
//! Construct-then-freeze: tools are registered at composition time, then
//! the registry is shared immutably (behind `Arc`) for the process
//! lifetime. Registration order is preserved because `list()` feeds logs
//! and the startup report, and a stable order keeps those readable.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::{ParamMap, ToolError, ToolResult, UserId};
use crate::ports::Tool;

/// Name-to-handler dispatch table.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name.
    ///
    /// Re-registering a name replaces the handler but keeps its original
    /// position, and logs a warning - silent replacement has hidden a
    /// mis-wired composition root before.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "tool re-registered, replacing previous handler");
        } else {
            self.order.push(name);
        }
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Whether a tool with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered tool names, in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Executes the named tool.
    ///
    /// Never panics and never propagates a handler failure: an unknown
    /// name yields `TOOL_NOT_FOUND` and a handler `Err` is converted to
    /// `TOOL_EXECUTION_ERROR` here, at the boundary.
    pub async fn execute(
        &self,
        name: &str,
        identity: Option<UserId>,
        params: &ParamMap,
    ) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            error!(
                tool = %name,
                available = ?self.list(),
                "tool not found in registry"
            );
            return ToolResult::fail(
                ToolError::ToolNotFound,
                format!("tool '{name}' is not registered"),
            );
        };

        match tool.call(identity, params).await {
            Ok(result) => result,
            Err(err) => {
                error!(tool = %name, error = %err, "tool handler failed");
                ToolResult::fail(ToolError::ToolExecutionError, err.to_string())
            }
        }
    }
}
