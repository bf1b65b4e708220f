//! Ordered section assembly for generated contexts.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, error};

use crate::domain::statements::defaults::{PROJECT_INTRO, PROJECT_START};
use crate::domain::{
    AppError, ContextSection, ContextTemplate, EnhancedContextData, WorkType, normalize_output,
};
use crate::ports::{PromptCatalog, StatementSource};

use super::section_builder::SectionBuilder;

/// Section keys in assembly order.
pub mod section_keys {
    pub const PROJECT_INTRO: &str = "project-intro";
    pub const CONTEXT_INIT: &str = "context-init";
    pub const TOOLS: &str = "tools-section";
    pub const MONOREPO: &str = "monorepo-section";
    pub const CURRENT_EVENTS: &str = "current-events";
    pub const INSTRUCTION: &str = "instruction";
    pub const ADDITIONAL_NOTES: &str = "additional-notes";
}

pub const TOOLS_TITLE: &str = "### 3rd-Party Tools & MCP";
pub const MONOREPO_TITLE: &str = "### Monorepo Note";
pub const CURRENT_EVENTS_TITLE: &str = "### Current Events";
pub const INSTRUCTION_TITLE: &str = "### Instruction Prompt";
pub const ADDITIONAL_NOTES_TITLE: &str = "### Additional Notes";

const CONTEXT_INIT_FALLBACK: &str = "Project context and environment details follow.";
const DEFAULT_TEMPLATE_VERSION: &str = "1.0.0";

static SECTION_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("section variable pattern must compile"));

/// Builds the ordered section list for a project and joins it into the
/// final document.
pub struct ContextTemplateEngine<S, P> {
    builder: SectionBuilder<S, P>,
    enabled: bool,
}

impl<S: StatementSource, P: PromptCatalog> ContextTemplateEngine<S, P> {
    pub fn new(statements: S, prompts: P) -> Self {
        Self::with_builder(SectionBuilder::new(statements, prompts))
    }

    pub fn with_builder(builder: SectionBuilder<S, P>) -> Self {
        Self { builder, enabled: true }
    }

    pub fn builder(&self) -> &SectionBuilder<S, P> {
        &self.builder
    }

    /// Whether callers should prefer this engine over the legacy template.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Generate the context document, never failing.
    ///
    /// Any error yields a minimal summary of the project fields instead.
    pub fn generate_context(&self, data: &EnhancedContextData) -> String {
        match self.try_generate_context(data) {
            Ok(context) => context,
            Err(err) => {
                error!(error = %err, "Error generating context with template engine");
                fallback_context(data)
            }
        }
    }

    pub fn try_generate_context(&self, data: &EnhancedContextData) -> Result<String, AppError> {
        validate_input(data)?;
        let template = self.build_template(data)?;
        let assembled = self.assemble_sections(&template, data);
        Ok(normalize_output(&assembled))
    }

    /// The sections that apply to `data`, each tagged with its order.
    pub fn build_template(&self, data: &EnhancedContextData) -> Result<ContextTemplate, AppError> {
        let processor = self.builder.processor();
        let context = &data.context;
        let mut sections = Vec::new();

        sections.push(ContextSection::new(section_keys::PROJECT_INTRO, self.project_intro(data)?, 1));

        let context_init = self
            .builder
            .prompts()
            .context_initialization_prompt()?
            .map(|prompt| processor.process_template(&prompt.content, data))
            .unwrap_or_else(|| CONTEXT_INIT_FALLBACK.to_string());
        sections.push(ContextSection::new(section_keys::CONTEXT_INIT, context_init, 2));

        if data.has_tools_or_mcp() {
            sections.push(
                ContextSection::new(section_keys::TOOLS, self.builder.build_tools_section(data), 3)
                    .with_title(TOOLS_TITLE)
                    .when(EnhancedContextData::has_tools_or_mcp),
            );
        }

        if context.is_monorepo {
            sections.push(
                ContextSection::new(section_keys::MONOREPO, self.builder.build_monorepo_section(data), 4)
                    .with_title(MONOREPO_TITLE)
                    .when(|data| data.context.is_monorepo),
            );
        }

        if !context.recent_events.trim().is_empty() {
            sections.push(
                ContextSection::new(section_keys::CURRENT_EVENTS, context.recent_events.as_str(), 5)
                    .with_title(CURRENT_EVENTS_TITLE),
            );
        }

        sections.push(
            ContextSection::new(section_keys::INSTRUCTION, self.builder.build_instruction_section(data), 6)
                .with_title(INSTRUCTION_TITLE),
        );

        if !context.additional_notes.trim().is_empty() {
            sections.push(
                ContextSection::new(section_keys::ADDITIONAL_NOTES, context.additional_notes.as_str(), 7)
                    .with_title(ADDITIONAL_NOTES_TITLE),
            );
        }

        debug!(
            sections = ?sections.iter().map(|section| section.key.as_str()).collect::<Vec<_>>(),
            "Built context template"
        );
        Ok(ContextTemplate {
            sections,
            version: data
                .template_version
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPLATE_VERSION.to_string()),
        })
    }

    fn project_intro(&self, data: &EnhancedContextData) -> Result<String, AppError> {
        let statements = self.builder.statements();
        if data.work_type == WorkType::Start {
            let start = statements.statement(PROJECT_START)?;
            if !start.trim().is_empty() {
                return Ok(start);
            }
        }
        statements.statement(PROJECT_INTRO)
    }

    /// Join the included, non-blank sections of `template` in order.
    ///
    /// Only known `{{name}}` variables are replaced; others stay literal.
    pub fn assemble_sections(&self, template: &ContextTemplate, data: &EnhancedContextData) -> String {
        let mut sections: Vec<&ContextSection> = template.sections.iter().collect();
        sections.sort_by_key(|section| section.order);

        sections
            .into_iter()
            .filter(|section| section.is_included(data))
            .map(|section| {
                let content = replace_section_variables(&section.content, data);
                match section.title.as_deref().filter(|title| !title.is_empty()) {
                    Some(title) => format!("{title}\n{content}"),
                    None => content,
                }
            })
            .filter(|content| !content.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn replace_section_variables(content: &str, data: &EnhancedContextData) -> String {
    SECTION_VARIABLE
        .replace_all(content, |caps: &Captures| {
            section_variable(&caps[1], data).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn section_variable(name: &str, data: &EnhancedContextData) -> Option<String> {
    let context = &data.context;
    Some(match name {
        "projectName" => context.project_name.clone(),
        "template" => context.template.clone(),
        "slice" => context.slice.clone(),
        "instruction" => context.instruction.clone(),
        "isMonorepo" => yes_no(context.is_monorepo).to_string(),
        "availableTools" => data.available_tools.join(", "),
        "mcpServers" => data.mcp_servers.join(", "),
        _ => return None,
    })
}

/// Only empty fields count as missing; whitespace is a value.
fn validate_input(data: &EnhancedContextData) -> Result<(), AppError> {
    let context = &data.context;
    let missing: Vec<String> = [
        ("projectName", &context.project_name),
        ("template", &context.template),
        ("slice", &context.slice),
        ("instruction", &context.instruction),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name.to_string())
    .collect();

    if missing.is_empty() { Ok(()) } else { Err(AppError::MissingRequiredFields(missing)) }
}

fn fallback_context(data: &EnhancedContextData) -> String {
    let context = &data.context;
    format!(
        "# Project: {}\nTemplate: {}\nSlice: {}\nInstruction: {}\nMonorepo: {}",
        or_unknown(&context.project_name),
        or_unknown(&context.template),
        or_unknown(&context.slice),
        or_unknown(&context.instruction),
        yes_no(context.is_monorepo),
    )
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() { "Unknown" } else { value }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
