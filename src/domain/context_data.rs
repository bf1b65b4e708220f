//! Flattened projections of a project record used as template input.
//!
//! Template variables resolve through explicit accessor tables rather than
//! dynamic field access; names missing from a table are simply unknown.

use std::collections::HashMap;

use crate::domain::AppError;
use crate::domain::project::{ProjectRecord, WorkType};

/// A value a template variable can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl TemplateValue {
    /// Whether the value selects the `{{#if}}` branch. Lists are always
    /// truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Text(text) => !text.is_empty(),
            TemplateValue::Flag(flag) => *flag,
            TemplateValue::List(_) => true,
        }
    }

    /// Text form used for substitution.
    pub fn render(&self) -> String {
        match self {
            TemplateValue::Text(text) => text.clone(),
            TemplateValue::Flag(flag) => flag.to_string(),
            TemplateValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Flag(value)
    }
}

/// Source of template variable values.
///
/// `Ok(None)` means the variable is not defined. An `Err` signals the lookup
/// itself failed.
pub trait TemplateData {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError>;
}

impl TemplateData for HashMap<String, TemplateValue> {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError> {
        Ok(self.get(name).cloned())
    }
}

impl TemplateData for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError> {
        Ok(self.get(name).map(|value| TemplateValue::Text(value.clone())))
    }
}

impl<T: TemplateData + ?Sized> TemplateData for &T {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError> {
        (**self).lookup(name)
    }
}

type Accessor<T> = fn(&T) -> Option<TemplateValue>;

/// Core fields substituted into the legacy context template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextData {
    pub project_name: String,
    pub template: String,
    pub slice: String,
    pub instruction: String,
    pub is_monorepo: bool,
    pub recent_events: String,
    pub additional_notes: String,
}

const CONTEXT_VARIABLES: &[(&str, Accessor<ContextData>)] = &[
    ("projectName", |d| Some(d.project_name.as_str().into())),
    ("template", |d| Some(d.template.as_str().into())),
    ("slice", |d| Some(d.slice.as_str().into())),
    ("instruction", |d| Some(d.instruction.as_str().into())),
    ("isMonorepo", |d| Some(d.is_monorepo.into())),
    ("recentEvents", |d| Some(d.recent_events.as_str().into())),
    ("additionalNotes", |d| Some(d.additional_notes.as_str().into())),
];

impl ContextData {
    /// Map a project record, substituting a placeholder for every blank field.
    pub fn from_project(project: &ProjectRecord) -> Self {
        Self {
            project_name: non_blank_or(&project.name, "Unknown Project"),
            template: non_blank_or(&project.template, "Unknown Template"),
            slice: non_blank_or(&project.slice, "Unknown Slice"),
            instruction: non_blank_or(&project.instruction, "implementation"),
            is_monorepo: project.is_monorepo,
            recent_events: project.custom_data.recent_events.clone().unwrap_or_default(),
            additional_notes: project.custom_data.additional_notes.clone().unwrap_or_default(),
        }
    }
}

impl TemplateData for ContextData {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError> {
        Ok(resolve(CONTEXT_VARIABLES, self, name))
    }
}

/// Everything the section engine can draw on for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedContextData {
    pub context: ContextData,
    pub work_type: WorkType,
    pub monorepo_note: Option<String>,
    pub available_tools: Vec<String>,
    pub mcp_servers: Vec<String>,
    pub template_version: Option<String>,
}

const ENHANCED_VARIABLES: &[(&str, Accessor<EnhancedContextData>)] = &[
    ("monorepoNote", |d| d.monorepo_note.as_deref().map(Into::into)),
    ("availableTools", |d| Some(TemplateValue::List(d.available_tools.clone()))),
    ("mcpServers", |d| Some(TemplateValue::List(d.mcp_servers.clone()))),
    ("templateVersion", |d| d.template_version.as_deref().map(Into::into)),
    ("workType", |d| {
        Some(
            match d.work_type {
                WorkType::Start => "start",
                WorkType::Continue => "continue",
            }
            .into(),
        )
    }),
];

impl EnhancedContextData {
    pub fn new(context: ContextData) -> Self {
        Self {
            context,
            work_type: WorkType::default(),
            monorepo_note: None,
            available_tools: Vec::new(),
            mcp_servers: Vec::new(),
            template_version: None,
        }
    }

    /// Map a project record without inventing values for blank required
    /// fields, so the engine's validation can reject them.
    pub fn from_project(project: &ProjectRecord) -> Self {
        let custom = &project.custom_data;
        Self {
            context: ContextData {
                project_name: project.name.clone(),
                template: project.template.clone(),
                slice: project.slice.clone(),
                instruction: project.instruction.clone(),
                is_monorepo: project.is_monorepo,
                recent_events: custom.recent_events.clone().unwrap_or_default(),
                additional_notes: custom.additional_notes.clone().unwrap_or_default(),
            },
            work_type: project.work_type,
            monorepo_note: custom.monorepo_note.clone(),
            available_tools: project.available_tools(),
            mcp_servers: Vec::new(),
            template_version: None,
        }
    }

    pub fn with_mcp_servers(mut self, servers: Vec<String>) -> Self {
        self.mcp_servers = servers;
        self
    }

    pub fn with_template_version(mut self, version: impl Into<String>) -> Self {
        self.template_version = Some(version.into());
        self
    }

    pub fn has_tools_or_mcp(&self) -> bool {
        !self.available_tools.is_empty() || !self.mcp_servers.is_empty()
    }
}

impl TemplateData for EnhancedContextData {
    fn lookup(&self, name: &str) -> Result<Option<TemplateValue>, AppError> {
        if let Some(value) = resolve(ENHANCED_VARIABLES, self, name) {
            return Ok(Some(value));
        }
        self.context.lookup(name)
    }
}

fn resolve<T>(table: &[(&str, Accessor<T>)], data: &T, name: &str) -> Option<TemplateValue> {
    table.iter().find(|(key, _)| *key == name).and_then(|(_, accessor)| accessor(data))
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value.to_string() }
}
