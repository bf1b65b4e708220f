//! Entry point turning a project record into context text.

use tracing::{debug, error};

use crate::domain::{
    AppError, ContextData, EnhancedContextData, ProjectRecord, TemplateProcessor, normalize_output,
};
use crate::ports::{PromptCatalog, StatementSource};

use super::context_template_engine::ContextTemplateEngine;

/// Built-in template used by the legacy generation path.
pub const DEFAULT_TEMPLATE: &str = "# Project: {{projectName}}
Template: {{template}}
Slice: {{slice}}
Instruction: {{instruction}}
{{#if isMonorepo}}Monorepo: Yes{{else}}Monorepo: No{{/if}}

## Recent Events
{{recentEvents}}

## Additional Context
{{additionalNotes}}

## Current Status
Ready for {{instruction}} work on {{slice}} slice.";

/// Maps project records to context data and drives either the legacy
/// template or the section engine. Holds no persistent state.
#[derive(Debug, Clone)]
pub struct ContextIntegrator {
    processor: TemplateProcessor,
    template: String,
    mcp_servers: Vec<String>,
    template_version: Option<String>,
}

impl Default for ContextIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextIntegrator {
    pub fn new() -> Self {
        Self {
            processor: TemplateProcessor::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            mcp_servers: Vec::new(),
            template_version: None,
        }
    }

    /// Replace the legacy template, rejecting unbalanced markers.
    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self, AppError> {
        let template = template.into();
        if !self.processor.validate_template(&template) {
            return Err(AppError::Template("unbalanced template markers".into()));
        }
        self.template = template;
        Ok(self)
    }

    /// MCP servers advertised on the engine path.
    pub fn with_mcp_servers(mut self, servers: Vec<String>) -> Self {
        self.mcp_servers = servers;
        self
    }

    pub fn with_template_version(mut self, version: impl Into<String>) -> Self {
        self.template_version = Some(version.into());
        self
    }

    /// The built-in legacy template string.
    pub fn get_default_template(&self) -> &'static str {
        DEFAULT_TEMPLATE
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the project carries a name, template and slice.
    pub fn validate_project(&self, project: Option<&ProjectRecord>) -> bool {
        project.is_some_and(|project| {
            [&project.name, &project.template, &project.slice].iter().all(|field| !field.is_empty())
        })
    }

    /// Legacy path. Failures produce an error document instead.
    pub fn generate_context_from_project(&self, project: &ProjectRecord) -> String {
        let context = ContextData::from_project(project);
        match self.processor.try_process(&self.template, &context) {
            Ok(processed) => normalize_output(&processed),
            Err(err) => {
                error!(project = %project.name, error = %err, "Error generating context from project");
                error_context(project, &err)
            }
        }
    }

    /// Engine path. The engine supplies its own fallback on failure.
    pub fn generate_context_with_engine<S, P>(
        &self,
        project: &ProjectRecord,
        engine: &ContextTemplateEngine<S, P>,
    ) -> String
    where
        S: StatementSource,
        P: PromptCatalog,
    {
        engine.generate_context(&self.enhanced_data(project))
    }

    /// Use the engine when it is enabled, the legacy template otherwise.
    pub fn generate<S, P>(&self, project: &ProjectRecord, engine: &ContextTemplateEngine<S, P>) -> String
    where
        S: StatementSource,
        P: PromptCatalog,
    {
        if engine.is_enabled() {
            debug!(project = %project.name, "Generating context with template engine");
            self.generate_context_with_engine(project, engine)
        } else {
            debug!(project = %project.name, "Generating context with legacy template");
            self.generate_context_from_project(project)
        }
    }

    fn enhanced_data(&self, project: &ProjectRecord) -> EnhancedContextData {
        let data = EnhancedContextData::from_project(project).with_mcp_servers(self.mcp_servers.clone());
        match &self.template_version {
            Some(version) => data.with_template_version(version.as_str()),
            None => data,
        }
    }
}

fn error_context(project: &ProjectRecord, err: &AppError) -> String {
    let or_unknown = |value: &str| if value.is_empty() { "Unknown".to_string() } else { value.to_string() };
    format!(
        "# Project: {name}

⚠️ Error generating context: {err}

## Project Details
- Template: {template}
- Slice: {slice}
- Instruction: {instruction}
- Monorepo: {monorepo}

Please check the logs for detailed error information.",
        name = or_unknown(&project.name),
        template = or_unknown(&project.template),
        slice = or_unknown(&project.slice),
        instruction = or_unknown(&project.instruction),
        monorepo = if project.is_monorepo { "Yes" } else { "No" },
    )
}
