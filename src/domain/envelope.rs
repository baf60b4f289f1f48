//! Response envelope - the orchestrator's external contract.
//!
//! The envelope layer deliberately re-maps the tool taxonomy into its own
//! closed error vocabulary so the frontend can distinguish "a tool's
//! backend call was rejected" from "the model API key is invalid".

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tool_result::ParamMap;

/// Closed set of envelope-layer error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatErrorCode {
    /// The action needs a logged-in user and none was provided.
    AuthenticationRequired,
    /// The model API rejected our credentials (configuration defect).
    AuthenticationFailed,
    /// The model API quota or rate limit is exhausted.
    QuotaExceeded,
    /// A network-level failure reaching the model or the backend.
    NetworkError,
    /// A tool ran and failed (validation, missing record, backend error).
    ToolExecutionFailed,
    /// Anything else, including the unreachable tool-not-found guard.
    InternalError,
}

impl ChatErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatErrorCode::AuthenticationRequired => "authentication_required",
            ChatErrorCode::AuthenticationFailed => "authentication_failed",
            ChatErrorCode::QuotaExceeded => "quota_exceeded",
            ChatErrorCode::NetworkError => "network_error",
            ChatErrorCode::ToolExecutionFailed => "tool_execution_failed",
            ChatErrorCode::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ChatErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform response shape returned to the HTTP layer for every request.
///
/// Constructed fresh per request, never shared or cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    /// Assistant text on success; empty on failure.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ChatErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParamMap>,
    /// Request identifier for log correlation and support references.
    pub request_id: String,
}

impl ResponseEnvelope {
    /// Successful conversational reply (no tool involved).
    pub fn reply(message: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            error_message: None,
            tool_used: None,
            data: None,
            request_id: request_id.into(),
        }
    }

    /// Successful tool outcome with formatted message and structured data.
    pub fn tool_success(
        message: impl Into<String>,
        tool_used: impl Into<String>,
        data: Option<ParamMap>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            error_message: None,
            tool_used: Some(tool_used.into()),
            data,
            request_id: request_id.into(),
        }
    }

    /// Failure with an envelope error code and user-facing guidance.
    pub fn failure(
        code: ChatErrorCode,
        error_message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            message: String::new(),
            error: Some(code),
            error_message: Some(error_message.into()),
            tool_used: None,
            data: None,
            request_id: request_id.into(),
        }
    }

    /// Attaches the tool name to a failure envelope.
    pub fn with_tool(mut self, tool_used: impl Into<String>) -> Self {
        self.tool_used = Some(tool_used.into());
        self
    }
}
