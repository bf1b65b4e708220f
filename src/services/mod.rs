mod context_integrator;
mod context_template_engine;
mod prompt_cache;
mod section_builder;
mod statement_manager;
mod system_prompt_parser;

pub use context_integrator::{ContextIntegrator, DEFAULT_TEMPLATE};
pub use context_template_engine::{
    ADDITIONAL_NOTES_TITLE, CURRENT_EVENTS_TITLE, ContextTemplateEngine, INSTRUCTION_TITLE,
    MONOREPO_TITLE, TOOLS_TITLE, section_keys,
};
pub use prompt_cache::{CachedPrompts, DEFAULT_CAPACITY, DEFAULT_TTL, PromptCache};
pub use section_builder::{SectionBuilder, SectionBuilderOptions, SectionOptions};
pub use statement_manager::StatementManager;
pub use system_prompt_parser::SystemPromptParser;
