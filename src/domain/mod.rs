pub mod config;
pub mod context_data;
pub mod error;
pub mod front_matter;
pub mod project;
pub mod section;
pub mod statements;
pub mod system_prompt;
pub mod template;

pub use config::{EngineConfig, ForgeConfig, PathsConfig};
pub use context_data::{ContextData, EnhancedContextData, TemplateData, TemplateValue};
pub use error::AppError;
pub use project::{CustomData, ProjectRecord, WorkType};
pub use section::{ContextSection, ContextTemplate, SectionCondition};
pub use statements::{StatementFileMetadata, TemplateStatement};
pub use system_prompt::{ParsedPromptFile, PromptFileMetadata, SystemPrompt};
pub use template::{TemplateProcessor, normalize_output};
