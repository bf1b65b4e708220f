//! Seeds a working directory with starter documents.

use std::path::PathBuf;

use tracing::debug;

use crate::adapters::assets::{SCAFFOLD_CONFIG, SCAFFOLD_SYSTEM_PROMPTS, scaffold_content};
use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::config::config_path;
use crate::ports::DocumentStore;
use crate::services::StatementManager;

/// Execute the init command.
///
/// Writes the configuration, fragment document and system prompt document.
/// Nothing is written when any of them already exists.
pub fn execute<D: DocumentStore>(ctx: &AppContext<D>) -> Result<Vec<PathBuf>, AppError> {
    let config = config_path(ctx.root());
    let statements = ctx.statements_path();
    let prompts = ctx.system_prompts_path();

    let targets = [&config, &statements, &prompts];
    if let Some(existing) = targets.iter().find(|path| ctx.store().exists(path)) {
        return Err(AppError::FileExists(existing.display().to_string()));
    }

    ctx.store().write_atomic(&config, scaffold_content(SCAFFOLD_CONFIG)?)?;
    ctx.store().write_atomic(&prompts, scaffold_content(SCAFFOLD_SYSTEM_PROMPTS)?)?;

    let mut manager = StatementManager::new(ctx.store(), statements.clone());
    manager.reset_to_defaults();
    manager.save()?;

    debug!(root = %ctx.root().display(), "Initialized context-forge documents");
    Ok(vec![config, statements, prompts])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::PromptCache;
    use crate::testing::MemoryDocumentStore;

    #[test]
    fn writes_all_starter_documents() {
        let ctx = AppContext::new("/work", MemoryDocumentStore::new())
            .unwrap()
            .with_cache(Arc::new(PromptCache::new()));

        let created = execute(&ctx).unwrap();

        assert_eq!(created.len(), 3);
        assert!(ctx.prompt_parser().validate_prompt_file().is_empty());
        assert!(ctx.statement_manager().metadata().last_updated.is_some());
    }

    #[test]
    fn refuses_to_overwrite() {
        let store = MemoryDocumentStore::new().with_file("/work/.context-forge/config.toml", "");
        let ctx = AppContext::new("/work", store).unwrap();

        assert!(matches!(execute(&ctx), Err(AppError::FileExists(_))));
        assert_eq!(ctx.store().content("/work/.context-forge/config.toml").as_deref(), Some(""));
    }
}
