//! Fragment store management.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::domain::statements::default_key_order;
use crate::domain::{AppError, TemplateStatement};
use crate::ports::DocumentStore;

/// Every fragment, defaults first in their canonical order.
pub fn list<D: DocumentStore>(ctx: &AppContext<D>) -> Result<Vec<TemplateStatement>, AppError> {
    let mut statements = ctx.statement_manager().all()?;
    let mut ordered: Vec<TemplateStatement> =
        default_key_order().filter_map(|key| statements.remove(key)).collect();
    ordered.extend(statements.into_values());
    Ok(ordered)
}

/// Content of one fragment.
pub fn get<D: DocumentStore>(ctx: &AppContext<D>, key: &str) -> Result<String, AppError> {
    ctx.statement_manager()
        .all()?
        .remove(key)
        .map(|statement| statement.content)
        .ok_or_else(|| AppError::StatementNotFound(key.to_string()))
}

/// Keys of fragments that `set` accepts.
pub fn editable_keys<D: DocumentStore>(ctx: &AppContext<D>) -> Result<Vec<String>, AppError> {
    Ok(list(ctx)?.into_iter().filter(|s| s.editable).map(|s| s.key).collect())
}

/// Update one fragment and persist the document, backing up the previous
/// file first. Returns the backup path when a file was backed up.
pub fn set<D: DocumentStore>(
    ctx: &AppContext<D>,
    key: &str,
    content: &str,
) -> Result<Option<PathBuf>, AppError> {
    let mut manager = ctx.statement_manager();
    manager.update(key, content)?;
    let backup = manager.backup()?;
    manager.save()?;
    Ok(backup)
}

/// Rewrite the document with the built-in fragments.
pub fn reset<D: DocumentStore>(ctx: &AppContext<D>) -> Result<Option<PathBuf>, AppError> {
    let mut manager = ctx.statement_manager();
    let backup = manager.backup()?;
    manager.reset_to_defaults();
    manager.save()?;
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statements::defaults::{PROJECT_INTRO, TOOL_INTRO};
    use crate::testing::MemoryDocumentStore;

    const STATEMENTS: &str = "/work/project-documents/user/statements/context-statements.md";

    fn context(store: MemoryDocumentStore) -> AppContext<MemoryDocumentStore> {
        AppContext::new("/work", store).unwrap()
    }

    #[test]
    fn list_starts_with_default_order() {
        let ctx = context(MemoryDocumentStore::new());

        let keys: Vec<String> = list(&ctx).unwrap().into_iter().map(|s| s.key).collect();

        assert_eq!(keys.first().map(String::as_str), Some(PROJECT_INTRO));
        assert!(keys.iter().any(|key| key == TOOL_INTRO));
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let ctx = context(MemoryDocumentStore::new());

        assert!(matches!(get(&ctx, "nope"), Err(AppError::StatementNotFound(_))));
    }

    #[test]
    fn set_persists_and_backs_up() {
        let ctx = context(MemoryDocumentStore::new());

        assert_eq!(set(&ctx, PROJECT_INTRO, "Fresh intro.").unwrap(), None);
        assert_eq!(get(&ctx, PROJECT_INTRO).unwrap(), "Fresh intro.");

        let backup = set(&ctx, PROJECT_INTRO, "Second intro.").unwrap();
        assert_eq!(backup, Some(PathBuf::from(format!("{STATEMENTS}.bak"))));
        assert!(ctx.store().content(format!("{STATEMENTS}.bak")).unwrap().contains("Fresh intro."));
    }

    #[test]
    fn reset_restores_defaults() {
        let ctx = context(MemoryDocumentStore::new());
        set(&ctx, PROJECT_INTRO, "Custom.").unwrap();

        reset(&ctx).unwrap();

        assert!(get(&ctx, PROJECT_INTRO).unwrap().contains("We are continuing work on our project"));
    }
}
