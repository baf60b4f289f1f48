//! The closed set of tool names the assistant can dispatch.
//!
//! Tool names are the stable identifiers shared by the registry, the
//! startup manifest, and every call site. Using an enum instead of string
//! literals turns a typo into a compile error rather than a runtime
//! `TOOL_NOT_FOUND`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Functional grouping of tools, used for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    TaskManagement,
    Masjid,
    Prayer,
    Hadith,
}

impl ToolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::TaskManagement => "task_management",
            ToolCategory::Masjid => "masjid",
            ToolCategory::Prayer => "prayer",
            ToolCategory::Hadith => "hadith",
        }
    }
}

/// Every tool the assistant knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    CreateTask,
    ListTasks,
    UpdateTask,
    DeleteTask,
    CompleteTask,
    ListMasjids,
    GetMasjidDetails,
    SearchMasjids,
    GetPrayerTimes,
    GetCurrentPrayer,
    GetDailyHadith,
    GetRandomHadith,
}

impl ToolName {
    /// All twelve tools, in registration order.
    pub const ALL: [ToolName; 12] = [
        ToolName::CreateTask,
        ToolName::ListTasks,
        ToolName::UpdateTask,
        ToolName::DeleteTask,
        ToolName::CompleteTask,
        ToolName::ListMasjids,
        ToolName::GetMasjidDetails,
        ToolName::SearchMasjids,
        ToolName::GetPrayerTimes,
        ToolName::GetCurrentPrayer,
        ToolName::GetDailyHadith,
        ToolName::GetRandomHadith,
    ];

    /// Stable wire identifier for this tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::CreateTask => "create_task",
            ToolName::ListTasks => "list_tasks",
            ToolName::UpdateTask => "update_task",
            ToolName::DeleteTask => "delete_task",
            ToolName::CompleteTask => "complete_task",
            ToolName::ListMasjids => "list_masjids",
            ToolName::GetMasjidDetails => "get_masjid_details",
            ToolName::SearchMasjids => "search_masjids",
            ToolName::GetPrayerTimes => "get_prayer_times",
            ToolName::GetCurrentPrayer => "get_current_prayer",
            ToolName::GetDailyHadith => "get_daily_hadith",
            ToolName::GetRandomHadith => "get_random_hadith",
        }
    }

    /// Functional category this tool belongs to.
    pub fn category(&self) -> ToolCategory {
        match self {
            ToolName::CreateTask
            | ToolName::ListTasks
            | ToolName::UpdateTask
            | ToolName::DeleteTask
            | ToolName::CompleteTask => ToolCategory::TaskManagement,
            ToolName::ListMasjids | ToolName::GetMasjidDetails | ToolName::SearchMasjids => {
                ToolCategory::Masjid
            }
            ToolName::GetPrayerTimes | ToolName::GetCurrentPrayer => ToolCategory::Prayer,
            ToolName::GetDailyHadith | ToolName::GetRandomHadith => ToolCategory::Hadith,
        }
    }

    /// Whether dispatching this tool requires a known user identity.
    ///
    /// Task tools act on a specific user's records, so the orchestrator
    /// short-circuits to `authentication_required` when no identity is
    /// present, without touching the registry. Masjid, prayer, and hadith
    /// lookups are public data.
    pub fn requires_identity(&self) -> bool {
        matches!(self.category(), ToolCategory::TaskManagement)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownToolName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownToolName(s.to_string()))
    }
}

/// Error for strings that name no known tool.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown tool name: {0}")]
pub struct UnknownToolName(pub String);
