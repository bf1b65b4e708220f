use crate::domain::system_prompt::{
    extract_parameters, find_context_init, find_for_instruction, find_tool_use, generate_key,
};
use crate::domain::{AppError, SystemPrompt};
use crate::ports::PromptCatalog;

/// Prompt catalog over a fixed prompt list.
#[derive(Default)]
pub struct FakePromptCatalog {
    prompts: Vec<SystemPrompt>,
    failing: bool,
}

#[allow(dead_code)]
impl FakePromptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, name: &str, content: &str) -> Self {
        self.prompts.push(SystemPrompt {
            name: name.to_string(),
            key: generate_key(name),
            content: content.to_string(),
            parameters: extract_parameters(content),
        });
        self
    }

    /// Every lookup fails.
    pub fn failing() -> Self {
        Self { prompts: Vec::new(), failing: true }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::PromptFile("catalog unavailable".into()));
        }
        Ok(())
    }
}

impl PromptCatalog for FakePromptCatalog {
    fn context_initialization_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        self.check()?;
        Ok(find_context_init(&self.prompts).cloned())
    }

    fn tool_use_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        self.check()?;
        Ok(find_tool_use(&self.prompts).cloned())
    }

    fn prompt_for_instruction(&self, instruction: &str) -> Result<Option<SystemPrompt>, AppError> {
        self.check()?;
        Ok(find_for_instruction(&self.prompts, instruction).cloned())
    }
}
