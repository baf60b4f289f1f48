//! Tool result taxonomy - the single outcome type for every tool invocation.
//!
//! All failures crossing a component boundary in this core are represented
//! as values of this closed taxonomy; no collaborator is permitted to throw
//! across a boundary. The orchestrator formats user-facing text from the
//! error kind alone, without knowing which collaborator produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Parameter and data mapping type used throughout the core.
pub type ParamMap = serde_json::Map<String, Value>;

/// Closed set of tool-layer error kinds.
///
/// Never extended ad hoc: every failure a tool invocation can produce maps
/// to exactly one of these. `ToolNotFound` is a defect signal, not a normal
/// error class - startup validation makes it unreachable for manifest tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolError {
    /// Transport-level failure reaching the backend (connect or timeout).
    NetworkError,
    /// Backend rejected the request with 401.
    AuthRequired,
    /// Backend reported the record missing (404).
    NotFound,
    /// Backend server error (status >= 500).
    ServerError,
    /// Backend rejected the request parameters (422).
    ValidationError,
    /// The requested tool is not in the registry.
    ToolNotFound,
    /// The tool handler itself failed.
    ToolExecutionError,
    /// Anything that does not fit the kinds above.
    UnknownError,
}

impl ToolError {
    /// Wire representation, matching the record-store error vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolError::NetworkError => "NETWORK_ERROR",
            ToolError::AuthRequired => "AUTH_REQUIRED",
            ToolError::NotFound => "NOT_FOUND",
            ToolError::ServerError => "SERVER_ERROR",
            ToolError::ValidationError => "VALIDATION_ERROR",
            ToolError::ToolNotFound => "TOOL_NOT_FOUND",
            ToolError::ToolExecutionError => "TOOL_EXECUTION_ERROR",
            ToolError::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a tool invocation.
///
/// Invariant: exactly one of `data` (on success) or `error` (on failure) is
/// populated. The constructors are the only way this type is built, so the
/// invariant holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParamMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ToolResult {
    /// Creates a successful result carrying structured data.
    pub fn ok(data: ParamMap) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_message: None,
        }
    }

    /// Creates a successful result with no payload (e.g. a 204 delete).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        let mut data = ParamMap::new();
        data.insert("message".to_string(), Value::String(message.into()));
        Self::ok(data)
    }

    /// Creates a failed result with a taxonomy kind and a readable message.
    pub fn fail(error: ToolError, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            error_message: Some(message.into()),
        }
    }

    /// Returns the error kind, if this is a failure.
    pub fn error_kind(&self) -> Option<ToolError> {
        self.error
    }
}
