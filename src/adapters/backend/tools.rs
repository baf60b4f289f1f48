//! Endpoint bindings for the twelve assistant tools.
//!
//! Each tool is a `BackendTool`: a name, an HTTP method, and a path
//! template. Path placeholders like `{task_id}` are filled from the
//! invocation parameters; whatever parameters remain travel as query
//! values for reads and as the JSON body for writes.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::client::BackendClient;
use crate::application::ToolRegistry;
use crate::domain::{ParamMap, ToolName, ToolResult, UserId};
use crate::ports::{Tool, ToolFailure};

/// A tool backed by one record-store endpoint.
pub struct BackendTool {
    client: Arc<BackendClient>,
    name: ToolName,
    description: &'static str,
    method: Method,
    path: &'static str,
    collection_key: &'static str,
}

impl BackendTool {
    fn new(
        client: Arc<BackendClient>,
        name: ToolName,
        description: &'static str,
        method: Method,
        path: &'static str,
        collection_key: &'static str,
    ) -> Self {
        Self {
            client,
            name,
            description,
            method,
            path,
            collection_key,
        }
    }
}

#[async_trait]
impl Tool for BackendTool {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn description(&self) -> &str {
        self.description
    }

    async fn call(
        &self,
        identity: Option<UserId>,
        params: &ParamMap,
    ) -> Result<ToolResult, ToolFailure> {
        let (path, remaining) = substitute_path(self.path, params)?;

        let (query, body) = if matches!(self.method, Method::GET | Method::DELETE) {
            (Some(remaining), None)
        } else {
            (None, Some(remaining))
        };

        Ok(self
            .client
            .execute(
                self.method.clone(),
                &path,
                identity,
                query.as_ref(),
                body.as_ref(),
                self.collection_key,
            )
            .await)
    }
}

/// Fills `{placeholder}` segments in a path template from the parameters.
///
/// Consumed parameters are removed from the returned map so a path value
/// never also appears in the query or body. A placeholder with no matching
/// parameter is a handler fault and returns `Err`.
fn substitute_path(template: &str, params: &ParamMap) -> Result<(String, ParamMap), ToolFailure> {
    let mut path = String::with_capacity(template.len());
    let mut remaining = params.clone();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let close = rest[open..]
            .find('}')
            .map(|offset| open + offset)
            .ok_or_else(|| format!("unclosed placeholder in path template '{template}'"))?;

        path.push_str(&rest[..open]);
        let key = &rest[open + 1..close];

        let value = remaining
            .remove(key)
            .ok_or_else(|| format!("missing required parameter '{key}'"))?;
        match value {
            Value::String(s) => path.push_str(&s),
            other => path.push_str(&other.to_string()),
        }

        rest = &rest[close + 1..];
    }
    path.push_str(rest);

    Ok((path, remaining))
}

/// Registers the twelve assistant tools against their endpoints.
///
/// Registration order follows `ToolName::ALL`.
pub fn register_backend_tools(registry: &mut ToolRegistry, client: Arc<BackendClient>) {
    let bindings: [(ToolName, &'static str, Method, &'static str, &'static str); 12] = [
        (
            ToolName::CreateTask,
            "Create a new task, optionally linked to a prayer",
            Method::POST,
            "/api/v1/tasks",
            "tasks",
        ),
        (
            ToolName::ListTasks,
            "List the user's tasks with optional status filters",
            Method::GET,
            "/api/v1/tasks",
            "tasks",
        ),
        (
            ToolName::UpdateTask,
            "Update an existing task's fields",
            Method::PUT,
            "/api/v1/tasks/{task_id}",
            "tasks",
        ),
        (
            ToolName::DeleteTask,
            "Delete a task",
            Method::DELETE,
            "/api/v1/tasks/{task_id}",
            "tasks",
        ),
        (
            ToolName::CompleteTask,
            "Mark a task as completed",
            Method::PATCH,
            "/api/v1/tasks/{task_id}/complete",
            "tasks",
        ),
        (
            ToolName::ListMasjids,
            "List known masjids",
            Method::GET,
            "/api/v1/masjids",
            "masjids",
        ),
        (
            ToolName::GetMasjidDetails,
            "Get details for one masjid",
            Method::GET,
            "/api/v1/masjids/{masjid_id}",
            "masjids",
        ),
        (
            ToolName::SearchMasjids,
            "Search masjids by name, area, or city",
            Method::GET,
            "/api/v1/masjids",
            "masjids",
        ),
        (
            ToolName::GetPrayerTimes,
            "Get the prayer timetable for a masjid",
            Method::GET,
            "/api/v1/masjids/{masjid_id}",
            "masjids",
        ),
        (
            ToolName::GetCurrentPrayer,
            "Get the current or next prayer at a masjid",
            Method::GET,
            "/api/v1/masjids/{masjid_id}/current-prayer",
            "masjids",
        ),
        (
            ToolName::GetDailyHadith,
            "Get today's hadith",
            Method::GET,
            "/api/v1/hadith/today",
            "hadiths",
        ),
        (
            ToolName::GetRandomHadith,
            "Get a random hadith",
            Method::GET,
            "/api/v1/hadith/random",
            "hadiths",
        ),
    ];

    for (name, description, method, path, collection_key) in bindings {
        registry.register(Arc::new(BackendTool::new(
            Arc::clone(&client),
            name,
            description,
            method,
            path,
            collection_key,
        )));
    }
}
