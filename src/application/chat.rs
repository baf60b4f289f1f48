//! Chat orchestrator - turns one user message into one response envelope.
//!
//! The flow is a small state machine: resolve intent, then either
//! dispatch a tool through the registry or render a prompt and call the
//! model. Every path, success or failure, ends in a `ResponseEnvelope`
//! carrying the request id; this method never returns an error.
//!
//! # Design
//!
//! The handler holds its collaborators behind `Arc` and is itself cheap
//! to share. It keeps no per-conversation state - history arrives with
//! each request and is read-only here.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use super::messages::{
    chat_error_message, format_tool_success, tool_error_guidance, SYSTEM_PROMPT,
};
use super::registry::ToolRegistry;
use crate::config::ChatConfig;
use crate::domain::{
    ChatErrorCode, ConversationTurn, ResponseEnvelope, ToolError, ToolName, UserId,
};
use crate::ports::{GenerateRequest, HealthReport, Intent, IntentExtractor, ModelError, ModelProvider};

/// One incoming chat message with its context.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
    /// Acting user, when logged in.
    pub identity: Option<UserId>,
    /// Prior conversation turns, oldest first.
    pub history: Vec<ConversationTurn>,
}

impl ChatRequest {
    /// Creates a request with no identity and no history.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            identity: None,
            history: Vec::new(),
        }
    }

    /// Sets the acting user.
    pub fn with_identity(mut self, identity: UserId) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the conversation history.
    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Orchestrates tool dispatch and conversation over the ports.
pub struct ChatHandler {
    registry: Arc<ToolRegistry>,
    model: Arc<dyn ModelProvider>,
    intents: Arc<dyn IntentExtractor>,
    config: ChatConfig,
}

impl ChatHandler {
    /// Creates a handler over the given collaborators.
    pub fn new(
        registry: Arc<ToolRegistry>,
        model: Arc<dyn ModelProvider>,
        intents: Arc<dyn IntentExtractor>,
        config: ChatConfig,
    ) -> Self {
        Self {
            registry,
            model,
            intents,
            config,
        }
    }

    /// Processes one user message into a response envelope.
    ///
    /// Infallible by contract: every failure becomes a `success: false`
    /// envelope with an error code, never an `Err`.
    pub async fn process_message(&self, request: &ChatRequest) -> ResponseEnvelope {
        let request_id = Uuid::new_v4().to_string();
        info!(
            request_id = %request_id,
            user = ?request.identity,
            "processing chat message"
        );

        if let Some(envelope) = self.check_message(&request.message, &request_id) {
            return envelope;
        }

        let resolution = self.intents.extract(&request.message).await;

        match resolution.intent {
            Intent::Tool(name) => {
                self.dispatch_tool(name, request, resolution.parameters, request_id)
                    .await
            }
            Intent::Conversation => self.converse(request, request_id).await,
        }
    }

    /// Probes the model API. The registry needs no probe - it is static
    /// after startup validation.
    pub async fn health_check(&self) -> HealthReport {
        self.model.health_check().await
    }

    /// Rejects empty and oversized messages before any work happens.
    fn check_message(&self, message: &str, request_id: &str) -> Option<ResponseEnvelope> {
        if message.trim().is_empty() {
            return Some(ResponseEnvelope::failure(
                ChatErrorCode::InternalError,
                "Please enter a message.",
                request_id,
            ));
        }
        if message.chars().count() > self.config.max_message_len {
            return Some(ResponseEnvelope::failure(
                ChatErrorCode::InternalError,
                format!(
                    "That message is too long. Please keep it under {} characters.",
                    self.config.max_message_len
                ),
                request_id,
            ));
        }
        None
    }

    /// Tool branch: identity gate, registry dispatch, taxonomy mapping.
    async fn dispatch_tool(
        &self,
        name: ToolName,
        request: &ChatRequest,
        parameters: crate::domain::ParamMap,
        request_id: String,
    ) -> ResponseEnvelope {
        // Identity gate comes first: a task tool without a logged-in user
        // must not reach the registry at all.
        if name.requires_identity() && request.identity.is_none() {
            info!(request_id = %request_id, tool = %name, "rejected unauthenticated tool intent");
            return ResponseEnvelope::failure(
                ChatErrorCode::AuthenticationRequired,
                chat_error_message(ChatErrorCode::AuthenticationRequired, &request_id),
                request_id,
            );
        }

        let result = self
            .registry
            .execute(name.as_str(), request.identity, &parameters)
            .await;

        if result.success {
            let data = result.data.unwrap_or_default();
            let message = format_tool_success(name, &data);
            info!(request_id = %request_id, tool = %name, "tool dispatched successfully");
            return ResponseEnvelope::tool_success(message, name.as_str(), Some(data), request_id);
        }

        let kind = result.error.unwrap_or(ToolError::UnknownError);
        let detail = result.error_message.as_deref();
        warn!(request_id = %request_id, tool = %name, error = %kind, "tool dispatch failed");

        match kind {
            // A manifest tool missing from the registry is a wiring defect
            // startup validation should have caught; tell the user nothing
            // about it.
            ToolError::ToolNotFound => {
                error!(request_id = %request_id, tool = %name, "manifest tool missing from registry");
                ResponseEnvelope::failure(
                    ChatErrorCode::InternalError,
                    chat_error_message(ChatErrorCode::InternalError, &request_id),
                    request_id,
                )
            }
            ToolError::AuthRequired => ResponseEnvelope::failure(
                ChatErrorCode::AuthenticationRequired,
                tool_error_guidance(kind, detail),
                request_id,
            )
            .with_tool(name.as_str()),
            ToolError::NetworkError => ResponseEnvelope::failure(
                ChatErrorCode::NetworkError,
                tool_error_guidance(kind, detail),
                request_id,
            )
            .with_tool(name.as_str()),
            _ => ResponseEnvelope::failure(
                ChatErrorCode::ToolExecutionFailed,
                tool_error_guidance(kind, detail),
                request_id,
            )
            .with_tool(name.as_str()),
        }
    }

    /// Conversation branch: render the prompt, call the model, map errors.
    async fn converse(&self, request: &ChatRequest, request_id: String) -> ResponseEnvelope {
        let prompt = render_prompt(&request.history, &request.message, self.config.history_window);

        let generate = GenerateRequest::new(prompt)
            .with_system_instruction(SYSTEM_PROMPT)
            .with_request_id(request_id.clone());

        match self.model.generate(&generate).await {
            Ok(text) => {
                info!(request_id = %request_id, chars = text.len(), "model reply generated");
                ResponseEnvelope::reply(text, request_id)
            }
            Err(err) => {
                warn!(request_id = %request_id, error = %err, "model call failed");
                let code = match err {
                    ModelError::Auth(_) => ChatErrorCode::AuthenticationFailed,
                    ModelError::Quota(_) => ChatErrorCode::QuotaExceeded,
                    ModelError::Transient(_) => ChatErrorCode::NetworkError,
                    ModelError::Unknown(_) => ChatErrorCode::InternalError,
                };
                ResponseEnvelope::failure(code, chat_error_message(code, &request_id), request_id)
            }
        }
    }
}

/// Renders history plus the new message into a model prompt.
///
/// Only the last `window` turns are included. With no history the
/// message passes through bare.
fn render_prompt(history: &[ConversationTurn], message: &str, window: usize) -> String {
    if history.is_empty() {
        return message.to_string();
    }

    let start = history.len().saturating_sub(window);
    let mut prompt = String::new();
    for turn in &history[start..] {
        prompt.push_str(turn.role.prompt_label());
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }
    prompt.push_str("USER: ");
    prompt.push_str(message);
    prompt.push('\n');
    prompt
}
