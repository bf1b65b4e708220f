use serde::{Deserialize, Serialize};

/// One named, independently editable block of boilerplate text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStatement {
    /// Stable identifier, e.g. `project-intro-statement`.
    pub key: String,
    /// Body text; may contain `{{var}}` placeholders.
    pub content: String,
    /// Human-readable name, rendered as the `## ` header.
    pub description: String,
    pub editable: bool,
}

impl TemplateStatement {
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        editable: bool,
    ) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            description: description.into(),
            editable,
        }
    }
}

/// Front-matter of the statements document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementFileMetadata {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}
