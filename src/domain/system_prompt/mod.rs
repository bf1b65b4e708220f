mod model;
mod parser;

pub use model::{
    INSTRUCTION_MAPPING, ParsedPromptFile, PromptFileMetadata, SystemPrompt, fallback_prompts,
    mapped_prompt_name, special_keys,
};
pub use parser::{
    extract_parameters, find_context_init, find_for_instruction, find_tool_use, generate_key,
    parse_prompt_document, parse_prompt_sections,
};
