//! Domain types shared across the assistant core.
//!
//! Everything that crosses a component boundary is expressed here as a
//! value: the tool result taxonomy, the response envelope, conversation
//! turns, and the closed set of tool names.

mod conversation;
mod envelope;
mod tool_name;
mod tool_result;
mod user;

pub use conversation::{ConversationTurn, Role};
pub use envelope::{ChatErrorCode, ResponseEnvelope};
pub use tool_name::{ToolCategory, ToolName, UnknownToolName};
pub use tool_result::{ParamMap, ToolError, ToolResult};
pub use user::UserId;
