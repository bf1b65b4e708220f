use serde::{Deserialize, Serialize};

/// A named instructional prompt extracted from the system prompt file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    /// Section header text.
    pub name: String,
    /// Slug derived from `name`.
    pub key: String,
    /// Prompt body; may contain `{param}` placeholders.
    pub content: String,
    /// Placeholder names found in `content`, in first-seen order.
    pub parameters: Vec<String>,
}

/// Front-matter of the system prompt file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFileMetadata {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Result of parsing the system prompt file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPromptFile {
    pub prompts: Vec<SystemPrompt>,
    pub metadata: PromptFileMetadata,
    pub errors: Vec<String>,
}

/// Reserved keys for prompts with a special role.
pub mod special_keys {
    pub const CONTEXT_INITIALIZATION: &str = "context-initialization";
    pub const TOOL_USE: &str = "use-3rd-party-tool";
    pub const PROJECT_KICKOFF: &str = "project-kickoff";
    pub const FEATURE_DESIGN: &str = "feature-design";
}

/// Instruction identifiers mapped to the prompt header they select.
pub const INSTRUCTION_MAPPING: &[(&str, &str)] = &[
    ("project-kickoff", "Project Kickoff"),
    ("concept-creation", "Concept Creation (Phase 1)"),
    ("spec-creation", "Spec Creation (Phase 2)"),
    ("planning", "Slice Planning (Phase 3)"),
    ("slice-planning", "Slice Planning (Phase 3)"),
    ("slice-design", "Slice Design (Phase 4)"),
    ("feature-design", "Feature Design"),
    ("task-breakdown", "Slice | Feature Task Breakdown (Phase 5)"),
    ("task-expansion", "Slice Task Expansion (Phase 6)"),
    ("implementation", "Slice | Feature Implementation (Phase 7)"),
    ("debugging", "Analysis Task Implementation"),
    ("analysis", "Analysis Processing"),
];

/// Prompt header mapped to `instruction`, matched case-insensitively.
pub fn mapped_prompt_name(instruction: &str) -> Option<&'static str> {
    let instruction = instruction.to_lowercase();
    INSTRUCTION_MAPPING.iter().find(|(key, _)| *key == instruction).map(|(_, name)| *name)
}

const FALLBACK_CONTEXT_INIT: &str = "The following provides context on our current work in \
slice-based project {project}. Input may contain: { project, slice, task, issue, tool, note }.

We are using the slice-based methodology from guide.ai-project.00-process. Current work context:
- Project: {project}
- Current slice: {slice} (if applicable)
- Tasks File: {taskFile}
- Phase: [specify current phase]

If you were previously assigned a role, continue in that role. If not, assume role of Senior AI \
as defined in the Process Guide.";

const FALLBACK_TOOL_USE: &str = "You will need to consult specific knowledge for {tool}, which \
should be available to you in the tool-guides/{tool} directory for our curated knowledge. Follow \
these steps when working with {tool}. Use these tools proactively.

1. Consult Overview: Start with the specific AI Tool Overview [toolname].md in the \
project-documents/tool-guides/{tool} directory.
2. Locate Docs: Scan the Overview for references to more detailed documentation.
3. Search Docs: Search within those specific documentation sources first.
4. Additional documentation: If you have a documentation tool available (ex: context7 MCP) use it \
for additional information.
5. Web Search Fallback: If the targeted search doesn't yield results, then search the web.";

/// Prompts served when the prompt file is missing.
pub fn fallback_prompts() -> Vec<SystemPrompt> {
    vec![
        SystemPrompt {
            name: "Model Change or Context Refresh".to_string(),
            key: special_keys::CONTEXT_INITIALIZATION.to_string(),
            content: FALLBACK_CONTEXT_INIT.to_string(),
            parameters: vec!["project".into(), "slice".into(), "taskFile".into()],
        },
        SystemPrompt {
            name: "Use 3rd Party Tool".to_string(),
            key: special_keys::TOOL_USE.to_string(),
            content: FALLBACK_TOOL_USE.to_string(),
            parameters: vec!["tool".into()],
        },
    ]
}
