//! System prompt catalog inspection.

use crate::app::AppContext;
use crate::domain::{AppError, ParsedPromptFile, SystemPrompt};
use crate::ports::DocumentStore;

pub fn list<D: DocumentStore>(ctx: &AppContext<D>) -> ParsedPromptFile {
    ctx.prompt_parser().parse_prompt_file()
}

/// Prompt selected for `instruction`.
pub fn show<D: DocumentStore>(ctx: &AppContext<D>, instruction: &str) -> Result<SystemPrompt, AppError> {
    ctx.prompt_parser()
        .prompt_for_instruction(instruction)
        .ok_or_else(|| AppError::PromptNotFound(instruction.to_string()))
}

pub fn validate<D: DocumentStore>(ctx: &AppContext<D>) -> Vec<String> {
    ctx.prompt_parser().validate_prompt_file()
}
