use std::collections::BTreeMap;

use super::model::TemplateStatement;

pub const PROJECT_INTRO: &str = "project-intro-statement";
pub const PROJECT_START: &str = "project-intro-start-statement";
pub const TOOL_INTRO: &str = "tool-intro-statement";
pub const NO_TOOLS: &str = "no-tools-statement";
pub const MONOREPO: &str = "monorepo-statement";
pub const INSTRUCTION_INTRO: &str = "instruction-intro-statement";
pub const CUSTOM_INSTRUCTION: &str = "custom-instruction-statement";
pub const CURRENT_EVENTS_HEADER: &str = "current-events-header";
pub const ADDITIONAL_NOTES_HEADER: &str = "additional-notes-header";

/// Document version written when the loaded file did not declare one.
pub const DEFAULT_DOCUMENT_VERSION: &str = "1.0.0";

/// `(key, description, content, editable)` in document order.
const DEFAULTS: &[(&str, &str, &str, bool)] = &[
    (
        PROJECT_INTRO,
        "Project Intro Statement",
        "We are continuing work on our project {{projectName}}. The context below describes \
         where the project stands and the work that comes next.",
        true,
    ),
    (
        PROJECT_START,
        "Project Start Statement",
        "We are starting work on a new project {{projectName}}. The context below describes \
         the project setup and the first piece of work.",
        true,
    ),
    (
        TOOL_INTRO,
        "Tool Intro Statement",
        "The following tools and MCP servers are available for this work:",
        true,
    ),
    (
        NO_TOOLS,
        "No Tools Statement",
        "No additional tools or MCP servers are configured for this project.",
        true,
    ),
    (
        MONOREPO,
        "Monorepo Statement",
        "This project is a monorepo. Current work is in the {{template}} package, \
         slice {{slice}}.",
        true,
    ),
    (INSTRUCTION_INTRO, "Instruction Intro Statement", "Current development phase:", true),
    (
        CUSTOM_INSTRUCTION,
        "Custom Instruction Statement",
        "Custom instruction: {{instruction}}",
        true,
    ),
    (CURRENT_EVENTS_HEADER, "Current Events Header", "### Current Events", false),
    (ADDITIONAL_NOTES_HEADER, "Additional Notes Header", "### Additional Notes", false),
];

/// The built-in statement set.
pub fn default_statements() -> BTreeMap<String, TemplateStatement> {
    DEFAULTS
        .iter()
        .map(|(key, description, content, editable)| {
            (key.to_string(), TemplateStatement::new(*key, *description, *content, *editable))
        })
        .collect()
}

/// Default keys in document order; used to keep saved files stable.
pub fn default_key_order() -> impl Iterator<Item = &'static str> {
    DEFAULTS.iter().map(|(key, ..)| *key)
}
