//! API Facade for the application.
//!
//! Each core operation is exposed as one named function. The plain variants
//! work in the current directory; the `_at` variants take the working root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::adapters::FilesystemDocumentStore;
use crate::app::AppContext;
use crate::app::commands::{generate, init, prompts, statements};
use crate::domain::{ProjectRecord, TemplateStatement};

pub use crate::app::commands::generate::GenerateOptions;
pub use crate::domain::{AppError, ParsedPromptFile, SystemPrompt};

/// Create an `AppContext` for a given path.
fn create_context(root: impl Into<PathBuf>) -> Result<AppContext<FilesystemDocumentStore>, AppError> {
    AppContext::new(root, FilesystemDocumentStore::new())
}

fn current_context() -> Result<AppContext<FilesystemDocumentStore>, AppError> {
    create_context(std::env::current_dir()?)
}

// =============================================================================
// Init
// =============================================================================

/// Seed the current directory with configuration and starter documents.
pub fn init() -> Result<Vec<PathBuf>, AppError> {
    init::execute(&current_context()?)
}

pub fn init_at(root: impl Into<PathBuf>) -> Result<Vec<PathBuf>, AppError> {
    init::execute(&create_context(root)?)
}

// =============================================================================
// Fragment store
// =============================================================================

/// Every fragment, merged over the built-in defaults.
pub fn load_statements() -> Result<BTreeMap<String, TemplateStatement>, AppError> {
    load_statements_at(std::env::current_dir()?)
}

pub fn load_statements_at(
    root: impl Into<PathBuf>,
) -> Result<BTreeMap<String, TemplateStatement>, AppError> {
    create_context(root)?.statement_manager().all()
}

/// Fragments in display order.
pub fn list_statements() -> Result<Vec<TemplateStatement>, AppError> {
    statements::list(&current_context()?)
}

pub fn get_statement(key: &str) -> Result<String, AppError> {
    get_statement_at(std::env::current_dir()?, key)
}

pub fn get_statement_at(root: impl Into<PathBuf>, key: &str) -> Result<String, AppError> {
    statements::get(&create_context(root)?, key)
}

/// Keys accepted by [`update_statement`].
pub fn editable_statement_keys() -> Result<Vec<String>, AppError> {
    statements::editable_keys(&current_context()?)
}

/// Update and persist one fragment. Returns the backup path, if any.
pub fn update_statement(key: &str, content: &str) -> Result<Option<PathBuf>, AppError> {
    update_statement_at(std::env::current_dir()?, key, content)
}

pub fn update_statement_at(
    root: impl Into<PathBuf>,
    key: &str,
    content: &str,
) -> Result<Option<PathBuf>, AppError> {
    statements::set(&create_context(root)?, key, content)
}

/// Apply several fragment updates and persist them in a single write.
///
/// Nothing is written when any update is rejected.
pub fn save_statements_at(
    root: impl Into<PathBuf>,
    updates: &BTreeMap<String, String>,
) -> Result<Option<PathBuf>, AppError> {
    let ctx = create_context(root)?;
    let mut manager = ctx.statement_manager();
    for (key, content) in updates {
        manager.update(key, content)?;
    }
    let backup = manager.backup()?;
    manager.save()?;
    Ok(backup)
}

pub fn save_statements(updates: &BTreeMap<String, String>) -> Result<Option<PathBuf>, AppError> {
    save_statements_at(std::env::current_dir()?, updates)
}

/// Rewrite the fragment document with the built-in set.
pub fn reset_statements() -> Result<Option<PathBuf>, AppError> {
    statements::reset(&current_context()?)
}

// =============================================================================
// System prompt catalog
// =============================================================================

pub fn parse_prompts() -> Result<ParsedPromptFile, AppError> {
    parse_prompts_at(std::env::current_dir()?)
}

pub fn parse_prompts_at(root: impl Into<PathBuf>) -> Result<ParsedPromptFile, AppError> {
    Ok(prompts::list(&create_context(root)?))
}

pub fn get_context_init_prompt() -> Result<Option<SystemPrompt>, AppError> {
    Ok(current_context()?.prompt_parser().context_initialization_prompt())
}

pub fn get_tool_use_prompt() -> Result<Option<SystemPrompt>, AppError> {
    Ok(current_context()?.prompt_parser().tool_use_prompt())
}

pub fn get_prompt_for_instruction(instruction: &str) -> Result<SystemPrompt, AppError> {
    get_prompt_for_instruction_at(std::env::current_dir()?, instruction)
}

pub fn get_prompt_for_instruction_at(
    root: impl Into<PathBuf>,
    instruction: &str,
) -> Result<SystemPrompt, AppError> {
    prompts::show(&create_context(root)?, instruction)
}

/// Structural problems with the system prompt document.
pub fn validate_prompts() -> Result<Vec<String>, AppError> {
    Ok(prompts::validate(&current_context()?))
}

// =============================================================================
// Generation
// =============================================================================

/// Generate context for the project record stored at `project_path`.
pub fn generate_context(project_path: &Path, options: &GenerateOptions) -> Result<String, AppError> {
    generate_context_at(std::env::current_dir()?, project_path, options)
}

pub fn generate_context_at(
    root: impl Into<PathBuf>,
    project_path: &Path,
    options: &GenerateOptions,
) -> Result<String, AppError> {
    let ctx = create_context(root)?;
    let project = generate::load_project(&ctx, project_path)?;
    generate::execute(&ctx, &project, options)
}

/// Generate context for an in-memory project record.
pub fn generate_context_for_at(
    root: impl Into<PathBuf>,
    project: &ProjectRecord,
    options: &GenerateOptions,
) -> Result<String, AppError> {
    generate::execute(&create_context(root)?, project, options)
}
