use crate::domain::{AppError, SystemPrompt};

/// Lookups against the system prompt catalog.
///
/// `Ok(None)` means nothing matched; callers supply their own fallback text.
pub trait PromptCatalog {
    fn context_initialization_prompt(&self) -> Result<Option<SystemPrompt>, AppError>;

    fn tool_use_prompt(&self) -> Result<Option<SystemPrompt>, AppError>;

    fn prompt_for_instruction(&self, instruction: &str) -> Result<Option<SystemPrompt>, AppError>;
}

impl<T: PromptCatalog + ?Sized> PromptCatalog for &T {
    fn context_initialization_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        (**self).context_initialization_prompt()
    }

    fn tool_use_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        (**self).tool_use_prompt()
    }

    fn prompt_for_instruction(&self, instruction: &str) -> Result<Option<SystemPrompt>, AppError> {
        (**self).prompt_for_instruction(instruction)
    }
}
