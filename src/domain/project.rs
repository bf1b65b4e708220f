//! Project records supplied by the external project store.

use serde::{Deserialize, Serialize};

/// Which opening statement a generated context should lead with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    /// Kicking off work on a fresh project.
    Start,
    /// Resuming work already in progress.
    #[default]
    Continue,
}

/// Free-form project fields edited alongside the core metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_events: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monorepo_note: Option<String>,
    /// Comma- or newline-separated tool names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_tools: Option<String>,
}

/// A persisted project as read from the project store.
///
/// The generation pipeline treats this as read-only input; persistence is the
/// caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub slice: String,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub is_monorepo: bool,
    #[serde(default)]
    pub custom_data: CustomData,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl ProjectRecord {
    /// Decode a project record from its JSON representation.
    pub fn from_json(content: &str) -> Result<Self, crate::domain::AppError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Tool names listed in `customData.availableTools`.
    pub fn available_tools(&self) -> Vec<String> {
        self.custom_data.available_tools.as_deref().map(split_tool_list).unwrap_or_default()
    }
}

/// Split a free-text tool list on commas and newlines, dropping blanks.
pub fn split_tool_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
