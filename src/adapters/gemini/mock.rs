//! Mock Model Provider - Scripted test double for the model port.
//!
//! Responses are served in FIFO order; when the script runs out the mock
//! falls back to a canned reply. Call counting lets tests assert how many
//! times the orchestrator actually reached for the model.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{GenerateRequest, HealthReport, ModelError, ModelProvider};

/// Scripted mock implementation of the model port.
pub struct MockModelProvider {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    call_count: AtomicUsize,
    health_error: Option<ModelError>,
    model: String,
}

impl MockModelProvider {
    /// Creates a mock that answers every request with a canned reply.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            call_count: AtomicUsize::new(0),
            health_error: None,
            model: "mock-model".to_string(),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: ModelError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Makes the health probe report unhealthy with the given error.
    pub fn with_health_error(mut self, error: ModelError) -> Self {
        self.health_error = Some(error);
        self
    }

    /// Number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockModelProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelProvider for MockModelProvider {
    async fn generate(&self, _request: &GenerateRequest) -> Result<String, ModelError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("This is a mock reply.".to_string()))
    }

    async fn health_check(&self) -> HealthReport {
        match &self.health_error {
            Some(error) => HealthReport::unhealthy(self.model.clone(), error),
            None => HealthReport::healthy(self.model.clone()),
        }
    }
}
