//! Model Provider Port - Interface for the generative-language backend.
//!
//! Implementations wrap an upstream model API and own the retry policy:
//! callers (the orchestrator) never retry, they only map the classified
//! error to an envelope code. The error type is a closed classification
//! that carries a user-safe message; raw upstream detail belongs in logs,
//! never in the returned value.

use async_trait::async_trait;
use serde::Serialize;

/// Port for generating free-form text from a prompt.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generates a response for the given request.
    ///
    /// Transient upstream failures are retried internally up to the
    /// provider's configured bound; all other classifications return
    /// immediately.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ModelError>;

    /// Probes the upstream API with a trivial prompt.
    ///
    /// Uses the same classification and retry policy as `generate`. Must
    /// never be placed on the startup path - an unhealthy model API is a
    /// degraded state, not a boot failure.
    async fn health_check(&self) -> HealthReport;
}

/// Request for free-form generation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Fully rendered prompt (history plus new message).
    pub prompt: String,
    /// Optional system-level instruction for the model.
    pub system_instruction: Option<String>,
    /// Request identifier, carried for log correlation only.
    pub request_id: Option<String>,
}

impl GenerateRequest {
    /// Creates a request with just a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            request_id: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the request id used in logs.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Classified model-call failure.
///
/// Each variant's string is already user-safe; upstream messages are logged
/// by the provider before classification and never surface here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Upstream rejected our credentials. Never retried - the same bad
    /// credential cannot succeed on a second attempt.
    #[error("model authentication failed: {0}")]
    Auth(String),

    /// Upstream quota or rate limit exhausted. Never retried - quota does
    /// not clear within a request's lifetime.
    #[error("model quota exceeded: {0}")]
    Quota(String),

    /// Deadline exceeded, service unavailable, or upstream internal error.
    /// Retried up to the provider's bound before being returned.
    #[error("model temporarily unavailable: {0}")]
    Transient(String),

    /// Unknown model identifier, empty response, or any other failure.
    #[error("model error: {0}")]
    Unknown(String),
}

impl ModelError {
    /// Whether the provider's retry loop may re-attempt after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ModelError::Transient(_))
    }

    /// Health-report error code for this classification.
    pub fn health_code(&self) -> &'static str {
        match self {
            ModelError::Auth(_) => "authentication_failed",
            ModelError::Quota(_) => "quota_exceeded",
            ModelError::Transient(_) => "network_error",
            ModelError::Unknown(_) => "unknown_error",
        }
    }
}

/// Health probe verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of a model health probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Model identifier the probe ran against.
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthReport {
    /// Healthy report for the given model.
    pub fn healthy(model: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            model: model.into(),
            error: None,
            message: None,
        }
    }

    /// Unhealthy report derived from a classified error.
    pub fn unhealthy(model: impl Into<String>, error: &ModelError) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            model: model.into(),
            error: Some(error.health_code()),
            message: Some(error.to_string()),
        }
    }

    /// Whether the probe succeeded.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
