//! System prompt catalog backed by the prompt markdown document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::system_prompt::{
    fallback_prompts, find_context_init, find_for_instruction, find_tool_use,
    parse_prompt_document,
};
use crate::domain::{AppError, ParsedPromptFile, PromptFileMetadata, SystemPrompt};
use crate::ports::{DocumentStore, PromptCatalog};

use super::prompt_cache::{CachedPrompts, PromptCache};

/// Parses `##### ` sections of the system prompt document into named
/// prompts, caching by absolute path and modify-time.
pub struct SystemPromptParser<D: DocumentStore> {
    store: D,
    path: PathBuf,
    cache: Arc<PromptCache>,
}

impl<D: DocumentStore> SystemPromptParser<D> {
    /// Parser sharing the process-wide cache.
    pub fn new(store: D, path: impl Into<PathBuf>) -> Self {
        Self::with_cache(store, path, PromptCache::global())
    }

    pub fn with_cache(store: D, path: impl Into<PathBuf>, cache: Arc<PromptCache>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self { store, path, cache }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the document, serving unchanged files from the cache.
    ///
    /// A missing or unreadable file yields the built-in fallback prompts and
    /// a description of the problem in `errors`.
    pub fn parse_prompt_file(&self) -> ParsedPromptFile {
        if !self.store.exists(&self.path) {
            warn!(path = %self.path.display(), "System prompt file not found");
            return fallback_file(format!("File not found: {}", self.path.display()));
        }

        let modified = match self.store.modified(&self.path) {
            Ok(modified) => Some(modified),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to stat system prompt file");
                None
            }
        };

        if let Some(cached) = modified.and_then(|modified| self.cache.get(&self.path, modified)) {
            debug!(path = %self.path.display(), "System prompt cache hit");
            return ParsedPromptFile {
                prompts: cached.prompts,
                metadata: cached.metadata,
                errors: Vec::new(),
            };
        }

        let content = match self.store.read(&self.path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Error parsing system prompt file");
                return fallback_file(format!("Parse error: {err}"));
            }
        };

        let (metadata, prompts) = parse_prompt_document(&content);
        debug!(path = %self.path.display(), count = prompts.len(), "Parsed system prompt file");
        if let Some(modified) = modified {
            let value = CachedPrompts { prompts: prompts.clone(), metadata: metadata.clone() };
            self.cache.insert(&self.path, modified, value);
        }

        ParsedPromptFile { prompts, metadata, errors: Vec::new() }
    }

    pub fn all_prompts(&self) -> Vec<SystemPrompt> {
        self.parse_prompt_file().prompts
    }

    pub fn prompt_by_key(&self, key: &str) -> Option<SystemPrompt> {
        self.parse_prompt_file().prompts.into_iter().find(|prompt| prompt.key == key)
    }

    pub fn context_initialization_prompt(&self) -> Option<SystemPrompt> {
        find_context_init(&self.parse_prompt_file().prompts).cloned()
    }

    pub fn tool_use_prompt(&self) -> Option<SystemPrompt> {
        find_tool_use(&self.parse_prompt_file().prompts).cloned()
    }

    /// Prompt for a development-phase instruction, matched case-insensitively.
    pub fn prompt_for_instruction(&self, instruction: &str) -> Option<SystemPrompt> {
        find_for_instruction(&self.parse_prompt_file().prompts, instruction).cloned()
    }

    /// Structural problems with the document; empty when it is well formed.
    pub fn validate_prompt_file(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.store.exists(&self.path) {
            errors.push("Prompt file does not exist".to_string());
            return errors;
        }

        let content = match self.store.read(&self.path) {
            Ok(content) => content,
            Err(err) => {
                errors.push(format!("Validation error: {err}"));
                return errors;
            }
        };
        if !content.starts_with("---") {
            errors.push("Missing YAML frontmatter".to_string());
        }
        if !content.lines().any(|line| line.starts_with("##### ")) {
            errors.push("No prompt sections found (##### headers)".to_string());
        }

        errors.extend(self.parse_prompt_file().errors);
        errors
    }

    /// Drop the cached entry for this file so the next lookup re-reads it.
    pub fn clear_cache(&self) {
        self.cache.remove(&self.path);
    }
}

fn fallback_file(error: String) -> ParsedPromptFile {
    ParsedPromptFile {
        prompts: fallback_prompts(),
        metadata: PromptFileMetadata::default(),
        errors: vec![error],
    }
}

impl<D: DocumentStore> PromptCatalog for SystemPromptParser<D> {
    fn context_initialization_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        Ok(SystemPromptParser::context_initialization_prompt(self))
    }

    fn tool_use_prompt(&self) -> Result<Option<SystemPrompt>, AppError> {
        Ok(SystemPromptParser::tool_use_prompt(self))
    }

    fn prompt_for_instruction(&self, instruction: &str) -> Result<Option<SystemPrompt>, AppError> {
        Ok(SystemPromptParser::prompt_for_instruction(self, instruction))
    }
}
