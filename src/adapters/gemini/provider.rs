//! Gemini Provider - Implementation of ModelProvider for the Generative
//! Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_max_retries(2);
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! # Retry policy
//!
//! Only `Transient` classifications are retried, with a linear backoff:
//! after the n-th failed attempt the provider sleeps `retry_delay * n`.
//! Auth and quota failures return immediately - repeating them cannot
//! change the outcome.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::ports::{GenerateRequest, HealthReport, ModelError, ModelProvider};

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the HTTP client cannot be
    /// constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(&self, request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| {
                GeminiContent {
                    parts: vec![GeminiPart { text: text.clone() }],
                }
            }),
        }
    }

    /// One attempt: send, classify the status, extract the text.
    async fn attempt(&self, request: &GenerateRequest) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&self.to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Transient(format!(
                        "request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else if e.is_connect() {
                    ModelError::Transient("could not connect to the model API".to_string())
                } else {
                    ModelError::Unknown(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "model API error response");
            return Err(self.classify_status(status, &body));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Unknown(format!("failed to parse model response: {e}")))?;

        extract_text(payload)
    }

    /// Maps a non-2xx status onto the model error classification.
    fn classify_status(&self, status: StatusCode, body: &str) -> ModelError {
        match status.as_u16() {
            401 | 403 => ModelError::Auth("API key was rejected".to_string()),
            429 => ModelError::Quota("API quota or rate limit exceeded".to_string()),
            404 => ModelError::Unknown(format!(
                "model '{}' not found - check the configured model name",
                self.config.model
            )),
            500 | 503 | 504 => {
                ModelError::Transient(format!("upstream returned status {}", status.as_u16()))
            }
            _ => ModelError::Unknown(format!(
                "unexpected status {}: {}",
                status.as_u16(),
                truncate(body, 200)
            )),
        }
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ModelError> {
        let request_id = request.request_id.as_deref().unwrap_or("-");
        debug!(request_id, model = %self.config.model, "model generate");

        retry_generate(
            self.config.max_retries,
            self.config.retry_delay(),
            || self.attempt(request),
        )
        .await
    }

    async fn health_check(&self) -> HealthReport {
        let probe = GenerateRequest::new("Hello");
        match self.generate(&probe).await {
            Ok(_) => HealthReport::healthy(self.config.model.clone()),
            Err(err) => HealthReport::unhealthy(self.config.model.clone(), &err),
        }
    }
}

/// Runs `attempt_fn` up to `max_retries + 1` times.
///
/// Retries only on retryable errors, sleeping `base_delay * n` after the
/// n-th failure. Exhausting the bound yields a `Transient` error whose
/// message says the service is temporarily unavailable; the per-attempt
/// detail stays in the logs.
async fn retry_generate<F, Fut>(
    max_retries: u32,
    base_delay: Duration,
    mut attempt_fn: F,
) -> Result<String, ModelError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, ModelError>>,
{
    let mut attempt = 1u32;
    loop {
        match attempt_fn().await {
            Ok(text) => return Ok(text),
            Err(err) => {
                if !err.is_retryable() {
                    return Err(err);
                }
                if attempt > max_retries {
                    warn!(attempt, error = %err, "model retries exhausted");
                    return Err(ModelError::Transient(format!(
                        "service temporarily unavailable after {attempt} attempts"
                    )));
                }
                warn!(attempt, error = %err, "model attempt failed, retrying");
                sleep(base_delay * attempt).await;
                attempt += 1;
            }
        }
    }
}

/// Pulls the generated text out of a Gemini response body.
fn extract_text(response: GeminiResponse) -> Result<String, ModelError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        Err(ModelError::Unknown(
            "model returned an empty response".to_string(),
        ))
    } else {
        Ok(text)
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
