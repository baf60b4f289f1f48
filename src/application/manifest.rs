//! Tool manifest - the tools the orchestrator is allowed to dispatch.
//!
//! Startup validation checks this manifest against the registry, so a
//! tool added here without a registered handler fails the boot instead
//! of surfacing as `TOOL_NOT_FOUND` at request time.

use crate::domain::ToolName;

/// Every tool the chat orchestrator may dispatch.
pub const AGENT_TOOLS: [ToolName; 12] = ToolName::ALL;
