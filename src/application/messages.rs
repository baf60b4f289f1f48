//! User-facing text: the system prompt, tool success templates, and
//! canned error guidance.
//!
//! Formatting is deliberately defensive about data shapes - the record
//! store owns its schemas, and a missing field degrades to a generic
//! rendering rather than an error.

use serde_json::Value;

use crate::domain::{ChatErrorCode, ParamMap, ToolError, ToolName};

/// System instruction sent with every conversational model call.
pub(crate) const SYSTEM_PROMPT: &str = "\
You are SalaatFlow Assistant, a chatbot for managing spiritual tasks \
(prayers, deeds) and providing Islamic information.

Core principles:
1. Respect and reverence: use respectful Islamic terminology. When \
mentioning Prophet Muhammad, add (peace be upon him). Greet users with \
\"As-salamu alaykum\" when appropriate.
2. Be helpful, clear, and concise. Users may write in English or \
Urdu/Roman Urdu; respond in the user's language.
3. Accuracy: do not invent tasks, masjids, prayer times, or hadith. \
Those come from the user's own records.

You can help users create and manage spiritual tasks, find masjids and \
prayer times, and read a daily hadith.";

/// Formats a successful tool result into assistant text.
pub(crate) fn format_tool_success(name: ToolName, data: &ParamMap) -> String {
    match name {
        ToolName::CreateTask => format!(
            "✅ Task created successfully!\n\nTitle: {}\nPriority: {}\nLinked Prayer: {}",
            text_field(data, &["title"]).unwrap_or_else(|| "New Task".to_string()),
            text_field(data, &["priority"]).unwrap_or_else(|| "medium".to_string()),
            text_field(data, &["linked_prayer"]).unwrap_or_else(|| "None".to_string()),
        ),
        ToolName::ListTasks => format_task_list(data),
        ToolName::UpdateTask => match text_field(data, &["title"]) {
            Some(title) => format!("✅ Task updated successfully!\n\nTitle: {title}"),
            None => "✅ Task updated successfully!".to_string(),
        },
        ToolName::DeleteTask => "✅ Task deleted successfully.".to_string(),
        ToolName::CompleteTask => match text_field(data, &["title"]) {
            Some(title) => format!("✅ Marked \"{title}\" as complete!"),
            None => "✅ Task marked as complete!".to_string(),
        },
        ToolName::ListMasjids | ToolName::SearchMasjids => format_masjid_list(data),
        ToolName::GetMasjidDetails => format_masjid_details(data),
        ToolName::GetPrayerTimes => format_prayer_times(data),
        ToolName::GetCurrentPrayer => format_current_prayer(data),
        ToolName::GetDailyHadith | ToolName::GetRandomHadith => format_hadith(data),
    }
}

/// User-facing guidance for a tool-layer error.
///
/// `detail` is the backend's own message, used where it reads well
/// (missing records, validation problems); transport and server failures
/// get stable wording instead.
pub(crate) fn tool_error_guidance(kind: ToolError, detail: Option<&str>) -> String {
    match kind {
        ToolError::NetworkError => {
            "I couldn't reach the backend service. Please try again in a moment.".to_string()
        }
        ToolError::AuthRequired => "Please log in to do that.".to_string(),
        ToolError::NotFound => detail
            .map(str::to_string)
            .unwrap_or_else(|| "I couldn't find that record.".to_string()),
        ToolError::ServerError => {
            "The backend ran into a problem. Please try again shortly.".to_string()
        }
        ToolError::ValidationError => detail
            .map(|d| format!("Some of the provided values were invalid: {d}"))
            .unwrap_or_else(|| "Some of the provided values were invalid.".to_string()),
        ToolError::ToolNotFound | ToolError::UnknownError => {
            "Something went wrong on our side. Please try again later.".to_string()
        }
        ToolError::ToolExecutionError => detail
            .map(str::to_string)
            .unwrap_or_else(|| "The action could not be completed.".to_string()),
    }
}

/// Canned guidance for envelope-level failures on the conversation path.
pub(crate) fn chat_error_message(code: ChatErrorCode, request_id: &str) -> String {
    match code {
        ChatErrorCode::AuthenticationRequired => {
            "Please log in to manage your tasks.".to_string()
        }
        ChatErrorCode::AuthenticationFailed => format!(
            "The assistant is not configured correctly. Please contact support \
             and mention request {request_id}."
        ),
        ChatErrorCode::QuotaExceeded => {
            "The assistant is temporarily over its usage limit. Please try again later."
                .to_string()
        }
        ChatErrorCode::NetworkError => {
            "I couldn't reach the language service. Please try again in a moment.".to_string()
        }
        ChatErrorCode::ToolExecutionFailed => {
            "The action could not be completed. Please try again.".to_string()
        }
        ChatErrorCode::InternalError => {
            "Something went wrong on our side. Please try again.".to_string()
        }
    }
}

fn format_task_list(data: &ParamMap) -> String {
    let tasks = array_field(data, "tasks");
    if tasks.is_empty() {
        return "You don't have any tasks yet. Would you like to create one?".to_string();
    }

    let mut out = format!("📋 Your Tasks ({} total):\n\n", tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        let status = if task
            .get("completed")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            "✅"
        } else {
            "⏳"
        };
        let title = str_of(task.get("title")).unwrap_or_else(|| "(untitled)".to_string());
        let prayer = str_of(task.get("linked_prayer"))
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        let priority = str_of(task.get("priority")).unwrap_or_else(|| "medium".to_string());
        out.push_str(&format!(
            "{}. {status} {title}{prayer}\n   Priority: {priority}\n\n",
            i + 1
        ));
    }
    out
}

fn format_masjid_list(data: &ParamMap) -> String {
    let masjids = array_field(data, "masjids");
    if masjids.is_empty() {
        return "No masjids found.".to_string();
    }

    let mut out = format!("🕌 Found {} masjid(s):\n\n", masjids.len());
    for (i, masjid) in masjids.iter().enumerate() {
        let name = str_of(masjid.get("name")).unwrap_or_else(|| "(unnamed)".to_string());
        out.push_str(&format!("{}. {name}\n", i + 1));
        if let (Some(area), Some(city)) =
            (str_of(masjid.get("area_name")), str_of(masjid.get("city")))
        {
            out.push_str(&format!("   Area: {area}, {city}\n"));
        }
        if let (Some(fajr), Some(dhuhr)) =
            (str_of(masjid.get("fajr_time")), str_of(masjid.get("dhuhr_time")))
        {
            out.push_str(&format!("   Fajr: {fajr} | Dhuhr: {dhuhr}\n"));
        }
        out.push('\n');
    }
    out
}

fn format_masjid_details(data: &ParamMap) -> String {
    let name = match text_field(data, &["name"]) {
        Some(name) => name,
        None => return fallback_render(data),
    };

    let mut out = format!("🕌 {name}\n");
    if let (Some(area), Some(city)) =
        (text_field(data, &["area_name"]), text_field(data, &["city"]))
    {
        out.push_str(&format!("Area: {area}, {city}\n"));
    }
    if let Some(address) = text_field(data, &["address"]) {
        out.push_str(&format!("Address: {address}\n"));
    }
    out.push_str(&prayer_time_lines(data));
    out
}

fn format_prayer_times(data: &ParamMap) -> String {
    let lines = prayer_time_lines(data);
    if lines.is_empty() {
        return fallback_render(data);
    }
    match text_field(data, &["name"]) {
        Some(name) => format!("🕌 Prayer times at {name}:\n\n{lines}"),
        None => format!("🕌 Prayer times:\n\n{lines}"),
    }
}

fn format_current_prayer(data: &ParamMap) -> String {
    let current = text_field(data, &["current_prayer"]);
    let next = text_field(data, &["next_prayer"]);
    let next_time = text_field(data, &["next_prayer_time", "next_time"]);

    match (current, next) {
        (Some(current), Some(next)) => {
            let when = next_time.map(|t| format!(" at {t}")).unwrap_or_default();
            format!("🕌 The current prayer is {current}. Next up: {next}{when}.")
        }
        (Some(current), None) => format!("🕌 The current prayer is {current}."),
        (None, Some(next)) => {
            let when = next_time.map(|t| format!(" at {t}")).unwrap_or_default();
            format!("🕌 The next prayer is {next}{when}.")
        }
        (None, None) => fallback_render(data),
    }
}

fn format_hadith(data: &ParamMap) -> String {
    let text = match text_field(data, &["text", "hadith_text", "english_text"]) {
        Some(text) => text,
        None => return fallback_render(data),
    };

    let mut out = format!("📖 {text}");
    if let Some(source) = text_field(data, &["source", "reference"]) {
        out.push_str(&format!("\n\n— {source}"));
    }
    out
}

/// Prayer timetable lines, one per prayer whose time is present.
fn prayer_time_lines(data: &ParamMap) -> String {
    const PRAYERS: [(&str, &str); 5] = [
        ("Fajr", "fajr_time"),
        ("Dhuhr", "dhuhr_time"),
        ("Asr", "asr_time"),
        ("Maghrib", "maghrib_time"),
        ("Isha", "isha_time"),
    ];

    PRAYERS
        .iter()
        .filter_map(|&(label, key)| {
            text_field(data, &[key]).map(|time| format!("{label}: {time}\n"))
        })
        .collect()
}

/// First present key rendered as display text.
fn text_field(data: &ParamMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| str_of(data.get(*key)))
}

/// Renders a JSON value as display text; strings lose their quotes,
/// null counts as absent.
fn str_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn array_field<'a>(data: &'a ParamMap, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Last resort when a response shape has none of the expected fields.
fn fallback_render(data: &ParamMap) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|_| "Done.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ParamMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn create_task_template_lists_title_priority_and_prayer() {
        let data = map(json!({
            "id": 42,
            "title": "Read Surah Kahf",
            "priority": "high",
            "linked_prayer": "Fajr",
        }));

        let text = format_tool_success(ToolName::CreateTask, &data);
        assert!(text.starts_with("✅ Task created successfully!"));
        assert!(text.contains("Title: Read Surah Kahf"));
        assert!(text.contains("Priority: high"));
        assert!(text.contains("Linked Prayer: Fajr"));
    }

    #[test]
    fn create_task_defaults_missing_prayer_to_none() {
        let data = map(json!({"title": "Charity", "priority": "medium"}));
        let text = format_tool_success(ToolName::CreateTask, &data);
        assert!(text.contains("Linked Prayer: None"));
    }

    #[test]
    fn empty_task_list_invites_creation() {
        let data = map(json!({"tasks": [], "total": 0}));
        let text = format_tool_success(ToolName::ListTasks, &data);
        assert!(text.contains("don't have any tasks yet"));
    }

    #[test]
    fn task_list_marks_completion_state() {
        let data = map(json!({
            "total": 2,
            "tasks": [
                {"title": "Fajr prayer", "completed": true, "priority": "high"},
                {"title": "Read Quran", "completed": false, "priority": "medium", "linked_prayer": "Isha"},
            ]
        }));

        let text = format_tool_success(ToolName::ListTasks, &data);
        assert!(text.contains("📋 Your Tasks (2 total):"));
        assert!(text.contains("✅ Fajr prayer"));
        assert!(text.contains("⏳ Read Quran (Isha)"));
    }

    #[test]
    fn masjid_list_renders_area_and_times() {
        let data = map(json!({
            "total": 1,
            "masjids": [{
                "name": "Masjid Al-Noor",
                "area_name": "DHA",
                "city": "Karachi",
                "fajr_time": "05:30",
                "dhuhr_time": "13:15",
            }]
        }));

        let text = format_tool_success(ToolName::SearchMasjids, &data);
        assert!(text.contains("🕌 Found 1 masjid(s):"));
        assert!(text.contains("Masjid Al-Noor"));
        assert!(text.contains("Area: DHA, Karachi"));
        assert!(text.contains("Fajr: 05:30 | Dhuhr: 13:15"));
    }

    #[test]
    fn hadith_renders_text_and_source() {
        let data = map(json!({
            "text": "Actions are judged by intentions.",
            "source": "Sahih al-Bukhari 1",
        }));

        let text = format_tool_success(ToolName::GetDailyHadith, &data);
        assert!(text.starts_with("📖 Actions are judged by intentions."));
        assert!(text.contains("— Sahih al-Bukhari 1"));
    }

    #[test]
    fn prayer_times_list_each_present_prayer() {
        let data = map(json!({
            "name": "Masjid Al-Falah",
            "fajr_time": "05:15",
            "dhuhr_time": "13:00",
            "isha_time": "20:30",
        }));

        let text = format_tool_success(ToolName::GetPrayerTimes, &data);
        assert!(text.contains("Prayer times at Masjid Al-Falah"));
        assert!(text.contains("Fajr: 05:15"));
        assert!(text.contains("Isha: 20:30"));
        assert!(!text.contains("Asr:"));
    }

    #[test]
    fn validation_guidance_carries_backend_detail() {
        let text = tool_error_guidance(
            ToolError::ValidationError,
            Some("field required"),
        );
        assert!(text.contains("field required"));
    }

    #[test]
    fn tool_not_found_guidance_is_generic() {
        let text = tool_error_guidance(ToolError::ToolNotFound, Some("internal detail"));
        assert!(!text.contains("internal detail"));
    }

    #[test]
    fn auth_failed_message_references_request_id() {
        let text = chat_error_message(ChatErrorCode::AuthenticationFailed, "req-77");
        assert!(text.contains("req-77"));
    }
}
