//! Builders for the individual sections of a generated context.
//!
//! Every builder degrades to fallback text instead of failing; problems are
//! logged and generation carries on.

use tracing::warn;

use crate::domain::statements::defaults::{
    ADDITIONAL_NOTES_HEADER, CURRENT_EVENTS_HEADER, CUSTOM_INSTRUCTION, INSTRUCTION_INTRO,
    MONOREPO, NO_TOOLS, TOOL_INTRO,
};
use crate::domain::{
    AppError, ContextSection, EnhancedContextData, SectionCondition, TemplateProcessor,
};
use crate::ports::{PromptCatalog, StatementSource};

#[derive(Debug, Clone, Copy)]
pub struct SectionBuilderOptions {
    /// Keep sections whose content is blank after substitution.
    pub include_empty_sections: bool,
}

impl Default for SectionBuilderOptions {
    fn default() -> Self {
        Self { include_empty_sections: true }
    }
}

/// Optional attributes for [`SectionBuilder::create_section`].
#[derive(Clone, Default)]
pub struct SectionOptions {
    pub title: Option<String>,
    pub conditional: bool,
    pub condition: Option<SectionCondition>,
}

/// Builds section bodies from fragments, catalog prompts and project fields.
pub struct SectionBuilder<S, P> {
    statements: S,
    prompts: P,
    processor: TemplateProcessor,
    options: SectionBuilderOptions,
}

impl<S: StatementSource, P: PromptCatalog> SectionBuilder<S, P> {
    pub fn new(statements: S, prompts: P) -> Self {
        Self::with_options(statements, prompts, SectionBuilderOptions::default())
    }

    pub fn with_options(statements: S, prompts: P, options: SectionBuilderOptions) -> Self {
        Self { statements, prompts, processor: TemplateProcessor::new(), options }
    }

    pub fn statements(&self) -> &S {
        &self.statements
    }

    pub fn prompts(&self) -> &P {
        &self.prompts
    }

    pub fn processor(&self) -> &TemplateProcessor {
        &self.processor
    }

    /// Tool intro, the tool-use prompt and the MCP server list.
    ///
    /// Without tools or servers this is the no-tools fragment.
    pub fn build_tools_section(&self, data: &EnhancedContextData) -> String {
        if !self.has_tools_or_mcp(data) {
            return self.statement_or_empty(NO_TOOLS);
        }

        self.try_tools_section(data).unwrap_or_else(|err| {
            warn!(error = %err, "Error building tools section");
            String::new()
        })
    }

    fn try_tools_section(&self, data: &EnhancedContextData) -> Result<String, AppError> {
        let intro = self.statements.statement(TOOL_INTRO)?;
        let prompt = match self.prompts.tool_use_prompt() {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(error = %err, "Tool use prompt unavailable, using intro only");
                return Ok(intro);
            }
        };

        let mut parts = vec![intro];
        if let Some(prompt) = prompt {
            parts.push(self.processor.try_process(&prompt.content, data)?);
        }
        if !data.mcp_servers.is_empty() {
            parts.push(format!("Available MCP servers: {}", data.mcp_servers.join(", ")));
        }
        Ok(join_paragraphs(parts))
    }

    /// Monorepo fragment for the current package and slice, followed by the
    /// project's monorepo note.
    pub fn build_monorepo_section(&self, data: &EnhancedContextData) -> String {
        self.try_monorepo_section(data).unwrap_or_else(|err| {
            warn!(error = %err, "Error building monorepo section");
            String::new()
        })
    }

    fn try_monorepo_section(&self, data: &EnhancedContextData) -> Result<String, AppError> {
        let statement = self.statements.statement(MONOREPO)?;
        let mut content = if statement.trim().is_empty() {
            format!(
                "Project is configured as a monorepo. Working in package: {}, Slice: {}",
                data.context.template, data.context.slice
            )
        } else {
            self.processor.try_process(&statement, data)?
        };

        if let Some(note) = data.monorepo_note.as_deref().map(str::trim).filter(|note| !note.is_empty())
        {
            content.push_str("\n\n");
            content.push_str(note);
        }
        Ok(content)
    }

    /// The catalog prompt for the project's instruction, or custom
    /// instruction text when the catalog has none.
    pub fn build_instruction_section(&self, data: &EnhancedContextData) -> String {
        self.try_instruction_section(data).unwrap_or_else(|err| {
            warn!(error = %err, "Error building instruction section");
            format!("Instruction: {}", data.context.instruction)
        })
    }

    fn try_instruction_section(&self, data: &EnhancedContextData) -> Result<String, AppError> {
        let instruction = &data.context.instruction;
        if let Some(prompt) = self.prompts.prompt_for_instruction(instruction)? {
            let intro = self.statements.statement(INSTRUCTION_INTRO)?;
            let body = self.processor.try_process(&prompt.content, data)?;
            return Ok(join_paragraphs(vec![intro, body]));
        }

        let custom = self.statements.statement(CUSTOM_INSTRUCTION)?;
        if custom.trim().is_empty() {
            return Ok(format!("Custom instruction: {instruction}"));
        }
        self.processor.try_process(&custom, data)
    }

    pub fn build_current_events_section(&self, data: &EnhancedContextData) -> String {
        self.headed_block(CURRENT_EVENTS_HEADER, &data.context.recent_events)
    }

    pub fn build_additional_notes_section(&self, data: &EnhancedContextData) -> String {
        self.headed_block(ADDITIONAL_NOTES_HEADER, &data.context.additional_notes)
    }

    fn headed_block(&self, header_key: &str, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        let header = self.statement_or_empty(header_key);
        let header = header.trim();
        if header.is_empty() { text.to_string() } else { format!("{header}\n{text}") }
    }

    /// Compact project summary in object-literal form.
    ///
    /// `template` is listed only for monorepos with a non-default template.
    pub fn build_project_info_section(&self, data: &EnhancedContextData) -> String {
        let context = &data.context;
        let mut lines = vec![format!("  project: {},", context.project_name)];
        if context.is_monorepo && !context.template.is_empty() && context.template != "default" {
            lines.push(format!("  template: {},", context.template));
        }
        let slice = if context.slice.is_empty() { "null" } else { context.slice.as_str() };
        lines.push(format!("  slice: {slice},"));
        lines.push("  taskFile: null,".to_string());
        lines.push(format!("  monorepo: {}", context.is_monorepo));

        format!("{{\n{}\n}}", lines.join("\n"))
    }

    /// Render one section: predicate first, then substitution, then title.
    pub fn build_section(&self, section: &ContextSection, data: &EnhancedContextData) -> String {
        if !section.is_included(data) {
            return String::new();
        }

        let content = self.processor.process_template(&section.content, data);
        if !self.options.include_empty_sections && content.trim().is_empty() {
            return String::new();
        }

        match section.title.as_deref().filter(|title| !title.is_empty()) {
            Some(title) => format!("{title}\n{content}"),
            None => content,
        }
    }

    /// Structural problems with `section`; empty when it is well formed.
    pub fn validate_section(&self, section: &ContextSection) -> Vec<String> {
        let mut errors = Vec::new();
        if section.key.trim().is_empty() {
            errors.push("Section must have a key".to_string());
        }
        if section.conditional && section.condition.is_none() {
            errors.push("Conditional section must have a condition function".to_string());
        }
        errors
    }

    pub fn create_section(
        &self,
        key: &str,
        content: &str,
        order: i32,
        options: SectionOptions,
    ) -> ContextSection {
        ContextSection {
            key: key.to_string(),
            title: options.title,
            content: content.to_string(),
            order,
            conditional: options.conditional,
            condition: options.condition,
        }
    }

    pub fn has_tools_or_mcp(&self, data: &EnhancedContextData) -> bool {
        data.has_tools_or_mcp()
    }

    pub fn detect_available_tools(&self, data: &EnhancedContextData) -> Vec<String> {
        data.available_tools.clone()
    }

    fn statement_or_empty(&self, key: &str) -> String {
        self.statements.statement(key).unwrap_or_else(|err| {
            warn!(key, error = %err, "Statement lookup failed");
            String::new()
        })
    }
}

fn join_paragraphs(parts: Vec<String>) -> String {
    parts.into_iter().filter(|part| !part.trim().is_empty()).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContextData;
    use crate::testing::{FakePromptCatalog, FakeStatementSource};
    use std::sync::Arc;

    fn statements() -> FakeStatementSource {
        FakeStatementSource::new()
            .with(TOOL_INTRO, "The following tools and MCP servers are available:")
            .with(NO_TOOLS, "No additional tools detected.")
            .with(MONOREPO, "Monorepo project: {{template}}, Slice: {{slice}}")
            .with(INSTRUCTION_INTRO, "Current development phase:")
            .with(CUSTOM_INSTRUCTION, "Custom: {{instruction}}")
            .with(CURRENT_EVENTS_HEADER, "### Current Events")
            .with(ADDITIONAL_NOTES_HEADER, "### Additional Notes")
    }

    fn prompts() -> FakePromptCatalog {
        FakePromptCatalog::new()
            .with_prompt("Use 3rd Party Tool", "Tools available for {project}")
            .with_prompt("Slice | Feature Implementation (Phase 7)", "Implementing {slice} in {project}")
    }

    fn data() -> EnhancedContextData {
        EnhancedContextData {
            available_tools: vec!["git".into(), "npm".into()],
            mcp_servers: vec!["context7".into()],
            template_version: Some("1.0.0".into()),
            ..EnhancedContextData::new(ContextData {
                project_name: "test-project".into(),
                template: "react".into(),
                slice: "test-slice".into(),
                instruction: "implementation".into(),
                is_monorepo: false,
                recent_events: "Fixed bug in auth".into(),
                additional_notes: "Focus on performance".into(),
            })
        }
    }

    fn monorepo(mut data: EnhancedContextData) -> EnhancedContextData {
        data.context.is_monorepo = true;
        data
    }

    #[test]
    fn tools_section_combines_intro_prompt_and_servers() {
        let builder = SectionBuilder::new(statements(), prompts());
        let result = builder.build_tools_section(&data());

        assert!(result.contains("The following tools and MCP servers are available"));
        assert!(result.contains("Tools available for test-project"));
        assert!(result.contains("Available MCP servers: context7"));
    }

    #[test]
    fn tools_section_without_tools_uses_no_tools_statement() {
        let builder = SectionBuilder::new(statements(), prompts());
        let mut data = data();
        data.available_tools.clear();
        data.mcp_servers.clear();

        assert_eq!(builder.build_tools_section(&data), "No additional tools detected.");
    }

    #[test]
    fn tools_section_without_prompt_keeps_intro_and_servers() {
        let builder = SectionBuilder::new(statements(), FakePromptCatalog::new());
        let result = builder.build_tools_section(&data());

        assert_eq!(
            result,
            "The following tools and MCP servers are available:\n\nAvailable MCP servers: context7"
        );
    }

    #[test]
    fn tools_section_degrades_on_failures() {
        let builder = SectionBuilder::new(statements(), FakePromptCatalog::failing());
        assert_eq!(
            builder.build_tools_section(&data()),
            "The following tools and MCP servers are available:"
        );

        let builder = SectionBuilder::new(FakeStatementSource::unloaded(), prompts());
        assert_eq!(builder.build_tools_section(&data()), "");
    }

    #[test]
    fn monorepo_section_substitutes_fragment() {
        let builder = SectionBuilder::new(statements(), prompts());

        assert_eq!(
            builder.build_monorepo_section(&monorepo(data())),
            "Monorepo project: react, Slice: test-slice"
        );
    }

    #[test]
    fn monorepo_section_falls_back_when_fragment_is_empty() {
        let builder = SectionBuilder::new(FakeStatementSource::new(), prompts());

        assert_eq!(
            builder.build_monorepo_section(&data()),
            "Project is configured as a monorepo. Working in package: react, Slice: test-slice"
        );
    }

    #[test]
    fn monorepo_section_appends_trimmed_note() {
        let builder = SectionBuilder::new(statements(), prompts());
        let mut data = monorepo(data());
        data.monorepo_note = Some("  Custom monorepo structure notes here\nWith multiple lines\n".into());

        assert_eq!(
            builder.build_monorepo_section(&data),
            "Monorepo project: react, Slice: test-slice\n\n\
             Custom monorepo structure notes here\nWith multiple lines"
        );

        data.monorepo_note = Some("   ".into());
        assert_eq!(builder.build_monorepo_section(&data), "Monorepo project: react, Slice: test-slice");
    }

    #[test]
    fn monorepo_section_is_empty_on_error() {
        let builder = SectionBuilder::new(FakeStatementSource::unloaded(), prompts());

        assert_eq!(builder.build_monorepo_section(&monorepo(data())), "");
    }

    #[test]
    fn instruction_section_wraps_matched_prompt() {
        let builder = SectionBuilder::new(statements(), prompts());

        assert_eq!(
            builder.build_instruction_section(&data()),
            "Current development phase:\n\nImplementing test-slice in test-project"
        );
    }

    #[test]
    fn instruction_section_fallbacks() {
        let builder = SectionBuilder::new(statements(), FakePromptCatalog::new());
        let mut custom = data();
        custom.context.instruction = "custom-task".into();
        assert_eq!(builder.build_instruction_section(&custom), "Custom: custom-task");

        let builder = SectionBuilder::new(FakeStatementSource::new(), FakePromptCatalog::new());
        assert_eq!(builder.build_instruction_section(&data()), "Custom instruction: implementation");

        let builder = SectionBuilder::new(statements(), FakePromptCatalog::failing());
        assert_eq!(builder.build_instruction_section(&data()), "Instruction: implementation");
    }

    #[test]
    fn events_and_notes_sections() {
        let builder = SectionBuilder::new(statements(), prompts());
        assert_eq!(builder.build_current_events_section(&data()), "### Current Events\nFixed bug in auth");
        assert_eq!(
            builder.build_additional_notes_section(&data()),
            "### Additional Notes\nFocus on performance"
        );

        let mut blank = data();
        blank.context.recent_events = "  ".into();
        blank.context.additional_notes = String::new();
        assert_eq!(builder.build_current_events_section(&blank), "");
        assert_eq!(builder.build_additional_notes_section(&blank), "");

        let headerless = SectionBuilder::new(FakeStatementSource::new(), prompts());
        assert_eq!(headerless.build_current_events_section(&data()), "Fixed bug in auth");
    }

    #[test]
    fn project_info_lists_template_only_for_monorepos() {
        let builder = SectionBuilder::new(statements(), prompts());
        let mut data = monorepo(data());
        data.context.template = "react-vite".into();
        assert_eq!(
            builder.build_project_info_section(&data),
            "{\n  project: test-project,\n  template: react-vite,\n  slice: test-slice,\n  taskFile: null,\n  monorepo: true\n}"
        );

        data.context.template = "default".into();
        assert!(!builder.build_project_info_section(&data).contains("template:"));

        data.context.template = "react-vite".into();
        data.context.is_monorepo = false;
        data.context.slice = String::new();
        assert_eq!(
            builder.build_project_info_section(&data),
            "{\n  project: test-project,\n  slice: null,\n  taskFile: null,\n  monorepo: false\n}"
        );
    }

    #[test]
    fn build_section_applies_title_and_substitution() {
        let builder = SectionBuilder::new(statements(), prompts());
        let section = ContextSection::new("test", "Test content for {{projectName}}", 1)
            .with_title("### Test Section");

        assert_eq!(
            builder.build_section(&section, &data()),
            "### Test Section\nTest content for test-project"
        );
    }

    #[test]
    fn build_section_honours_condition() {
        let builder = SectionBuilder::new(statements(), prompts());
        let section =
            ContextSection::new("conditional", "Conditional content", 1).when(|d| d.context.is_monorepo);

        assert_eq!(builder.build_section(&section, &data()), "");
        assert_eq!(builder.build_section(&section, &monorepo(data())), "Conditional content");
    }

    #[test]
    fn build_section_can_skip_blank_content() {
        let section = ContextSection::new("empty", "   ", 1).with_title("### Empty");

        let builder = SectionBuilder::with_options(
            statements(),
            prompts(),
            SectionBuilderOptions { include_empty_sections: false },
        );
        assert_eq!(builder.build_section(&section, &data()), "");

        let builder = SectionBuilder::new(statements(), prompts());
        assert_eq!(builder.build_section(&section, &data()), "### Empty\n   ");
    }

    #[test]
    fn tool_detection() {
        let builder = SectionBuilder::new(statements(), prompts());
        let mut data = data();
        assert!(builder.has_tools_or_mcp(&data));
        assert_eq!(builder.detect_available_tools(&data), vec!["git", "npm"]);

        data.available_tools.clear();
        assert!(builder.has_tools_or_mcp(&data));
        assert!(builder.detect_available_tools(&data).is_empty());

        data.mcp_servers.clear();
        assert!(!builder.has_tools_or_mcp(&data));
    }

    #[test]
    fn validate_section_reports_problems() {
        let builder = SectionBuilder::new(statements(), prompts());

        assert!(builder.validate_section(&ContextSection::new("test", "content", 1)).is_empty());
        assert_eq!(
            builder.validate_section(&ContextSection::new("", "content", 1)),
            vec!["Section must have a key"]
        );

        let conditional = ContextSection { conditional: true, ..ContextSection::new("test", "content", 1) };
        assert_eq!(
            builder.validate_section(&conditional),
            vec!["Conditional section must have a condition function"]
        );
    }

    #[test]
    fn create_section_applies_options() {
        let builder = SectionBuilder::new(statements(), prompts());

        let plain = builder.create_section("test", "content", 1, SectionOptions::default());
        assert_eq!((plain.key.as_str(), plain.content.as_str(), plain.order), ("test", "content", 1));
        assert!(plain.title.is_none() && !plain.conditional);

        let condition: SectionCondition = Arc::new(|_: &EnhancedContextData| true);
        let section = builder.create_section(
            "test",
            "content",
            1,
            SectionOptions { title: Some("### Test".into()), conditional: true, condition: Some(condition) },
        );
        assert_eq!(section.title.as_deref(), Some("### Test"));
        assert!(section.conditional && section.condition.is_some());
    }
}
