//! HTTP client for the record store.
//!
//! Every request ends in a `ToolResult`; this client never returns a
//! transport error to its callers. Status codes map onto the error
//! taxonomy in exactly one place (`classify_status`), and backend error
//! bodies are flattened to readable text by `detail_message`, which
//! accepts both the string and the list-of-objects shape the record
//! store emits for validation failures.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::domain::{ParamMap, ToolError, ToolResult, UserId};

/// Header carrying the acting user's identity to the record store.
const USER_HEADER: &str = "X-User-Id";

/// HTTP client for the record store.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Executes one request against the record store.
    ///
    /// `query` parameters ride the URL for reads, `body` is sent as JSON
    /// for writes. Array response bodies are wrapped under `collection_key`
    /// with a `total` count so every success carries an object.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        identity: Option<UserId>,
        query: Option<&ParamMap>,
        body: Option<&ParamMap>,
        collection_key: &str,
    ) -> ToolResult {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "backend request");

        let mut request = self.http.request(method, &url);

        if let Some(user) = identity {
            request = request.header(USER_HEADER, user.as_i64().to_string());
        }

        if let Some(params) = query {
            request = request.query(&query_pairs(params));
        }

        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, error = %err, "backend request failed");
                // Timeout and connect failures share an error kind; the
                // message text is what distinguishes them.
                return if err.is_timeout() {
                    ToolResult::fail(ToolError::NetworkError, "Backend request timed out")
                } else if err.is_connect() {
                    ToolResult::fail(
                        ToolError::NetworkError,
                        "Could not connect to the backend service",
                    )
                } else {
                    ToolResult::fail(ToolError::UnknownError, err.to_string())
                };
            }
        };

        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return ToolResult::ok_empty("Deleted successfully");
        }

        let raw = response.text().await.unwrap_or_default();
        let payload: Value = serde_json::from_str(&raw).unwrap_or(Value::Null);

        if !status.is_success() {
            let kind = classify_status(status);
            let trimmed = raw.trim();
            let message = detail_message(&payload)
                .or_else(|| (!trimmed.is_empty()).then(|| trimmed.to_string()))
                .unwrap_or_else(|| format!("Backend returned status {}", status.as_u16()));
            warn!(%url, status = status.as_u16(), error = %kind, "backend error response");
            return ToolResult::fail(kind, message);
        }

        if payload.is_null() {
            warn!(%url, "backend returned unparseable body");
            return ToolResult::fail(
                ToolError::UnknownError,
                "Backend returned an unreadable response",
            );
        }

        match payload {
            Value::Object(map) => ToolResult::ok(map),
            Value::Array(items) => {
                let mut data = ParamMap::new();
                data.insert("total".to_string(), Value::from(items.len()));
                data.insert(collection_key.to_string(), Value::Array(items));
                ToolResult::ok(data)
            }
            other => {
                let mut data = ParamMap::new();
                data.insert("value".to_string(), other);
                ToolResult::ok(data)
            }
        }
    }
}

/// Maps a non-2xx status onto the error taxonomy.
fn classify_status(status: StatusCode) -> ToolError {
    match status {
        StatusCode::UNAUTHORIZED => ToolError::AuthRequired,
        StatusCode::NOT_FOUND => ToolError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => ToolError::ValidationError,
        s if s.is_server_error() => ToolError::ServerError,
        _ => ToolError::UnknownError,
    }
}

/// Extracts readable text from a record-store error body.
///
/// The `detail` field is either a plain string or a list of validation
/// objects with a `msg` field; list entries are joined with ", ".
fn detail_message(payload: &Value) -> Option<String> {
    match payload.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Array(entries) => {
            let parts: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// Flattens a parameter map into query pairs.
///
/// String values pass through without JSON quoting; everything else uses
/// its JSON rendering.
fn query_pairs(params: &ParamMap) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            ToolError::AuthRequired
        );
        assert_eq!(classify_status(StatusCode::NOT_FOUND), ToolError::NotFound);
        assert_eq!(
            classify_status(StatusCode::UNPROCESSABLE_ENTITY),
            ToolError::ValidationError
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            ToolError::ServerError
        );
        assert_eq!(classify_status(StatusCode::BAD_GATEWAY), ToolError::ServerError);
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            ToolError::UnknownError
        );
    }

    #[test]
    fn detail_message_accepts_string_shape() {
        let payload = json!({"detail": "Task not found"});
        assert_eq!(detail_message(&payload).as_deref(), Some("Task not found"));
    }

    #[test]
    fn detail_message_joins_list_shape() {
        let payload = json!({
            "detail": [
                {"loc": ["body", "title"], "msg": "field required"},
                {"loc": ["body", "priority"], "msg": "value is not a valid enumeration member"},
            ]
        });
        assert_eq!(
            detail_message(&payload).as_deref(),
            Some("field required, value is not a valid enumeration member")
        );
    }

    #[test]
    fn detail_message_handles_missing_or_odd_shapes() {
        assert!(detail_message(&json!({})).is_none());
        assert!(detail_message(&json!({"detail": 42})).is_none());
        assert!(detail_message(&json!({"detail": []})).is_none());
        assert!(detail_message(&Value::Null).is_none());
    }

    #[test]
    fn query_pairs_render_strings_without_quotes() {
        let mut params = ParamMap::new();
        params.insert("city".to_string(), json!("Lahore"));
        params.insert("limit".to_string(), json!(10));

        let pairs = query_pairs(&params);
        assert!(pairs.contains(&("city".to_string(), "Lahore".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn connect_refused_maps_to_network_error() {
        // Port 9 (discard) has no listener; the connection is refused
        // before any HTTP exchange happens.
        let config = BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let client = BackendClient::new(&config).unwrap();

        let result = client
            .execute(
                Method::GET,
                "/api/v1/tasks",
                Some(UserId::new(1)),
                None,
                None,
                "tasks",
            )
            .await;

        assert!(!result.success);
        assert_eq!(result.error, Some(ToolError::NetworkError));
        assert!(result.data.is_none());
    }

    #[test]
    fn client_strips_trailing_slash_from_base_url() {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 5,
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
