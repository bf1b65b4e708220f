//! Prompt catalog commands.

use clap::Subcommand;

use crate::domain::AppError;

#[derive(Subcommand)]
pub enum PromptCommands {
    /// List parsed prompts
    #[clap(visible_alias = "ls")]
    List,
    /// Print the prompt selected for an instruction
    Show {
        /// Instruction such as "planning" or "implementation"
        instruction: String,
    },
    /// Check the prompt document structure
    Validate,
}

pub fn run_prompts(command: PromptCommands) -> Result<i32, AppError> {
    match command {
        PromptCommands::List => {
            let parsed = crate::app::api::parse_prompts()?;
            for error in &parsed.errors {
                eprintln!("⚠️  {}", error);
            }
            for prompt in &parsed.prompts {
                println!("{}  {}", prompt.key, prompt.name);
            }
            Ok(0)
        }
        PromptCommands::Show { instruction } => {
            let prompt = crate::app::api::get_prompt_for_instruction(&instruction)?;
            println!("##### {}\n\n{}", prompt.name, prompt.content);
            Ok(0)
        }
        PromptCommands::Validate => {
            let errors = crate::app::api::validate_prompts()?;
            if errors.is_empty() {
                println!("✅ System prompt file is valid");
                return Ok(0);
            }
            for error in &errors {
                println!("  • {}", error);
            }
            Ok(1)
        }
    }
}
