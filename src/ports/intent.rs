//! Intent Extractor Port - Interface to the natural-language layer.
//!
//! The assistant core does not understand natural language; an external
//! collaborator (keyword rules, a classifier model, anything) resolves a
//! user message into either a tool intent with extracted parameters or a
//! fall-through to free-form conversation. This port is that seam.

use async_trait::async_trait;

use crate::domain::{ParamMap, ToolName};

/// What a user message resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The message requests a specific tool.
    Tool(ToolName),
    /// No tool matched; answer conversationally.
    Conversation,
}

/// Intent plus whatever parameters the extractor pulled from the message.
#[derive(Debug, Clone)]
pub struct IntentResolution {
    pub intent: Intent,
    pub parameters: ParamMap,
}

impl IntentResolution {
    /// Resolution that dispatches a tool with the given parameters.
    pub fn tool(name: ToolName, parameters: ParamMap) -> Self {
        Self {
            intent: Intent::Tool(name),
            parameters,
        }
    }

    /// Resolution that falls through to conversation.
    pub fn conversation() -> Self {
        Self {
            intent: Intent::Conversation,
            parameters: ParamMap::new(),
        }
    }
}

/// Port for resolving a user message into an intent.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// Resolves `message` into a tool intent or a conversation fall-through.
    ///
    /// Must not fail: an extractor that cannot decide returns
    /// `IntentResolution::conversation()`.
    async fn extract(&self, message: &str) -> IntentResolution;
}
