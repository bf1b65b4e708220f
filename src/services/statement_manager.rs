//! Fragment store backed by the statements markdown document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::adapters::statement_document::render_statement_document;
use crate::domain::statements::{
    DEFAULT_DOCUMENT_VERSION, StatementDocument, default_key_order, default_statements,
    parse_statement_document,
};
use crate::domain::{AppError, StatementFileMetadata, TemplateStatement};
use crate::ports::{DocumentStore, StatementSource};

/// Keyed fragments loaded from a markdown document and merged with the
/// built-in defaults.
///
/// Lookups and mutations before [`StatementManager::load`] fail with
/// [`AppError::StatementsNotLoaded`].
pub struct StatementManager<D: DocumentStore> {
    store: D,
    path: PathBuf,
    statements: Option<BTreeMap<String, TemplateStatement>>,
    metadata: StatementFileMetadata,
}

impl<D: DocumentStore> StatementManager<D> {
    pub fn new(store: D, path: impl Into<PathBuf>) -> Self {
        Self { store, path: path.into(), statements: None, metadata: StatementFileMetadata::default() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.statements.is_some()
    }

    pub fn metadata(&self) -> &StatementFileMetadata {
        &self.metadata
    }

    /// Read the document and merge it over the defaults.
    ///
    /// A missing or unreadable document, or one without a single valid
    /// fragment, yields the default set.
    pub fn load(&mut self) {
        let mut statements = default_statements();
        self.metadata = StatementFileMetadata::default();

        match self.read_document() {
            Some(document) if !document.statements.is_empty() => {
                debug!(
                    path = %self.path.display(),
                    count = document.statements.len(),
                    "Loaded statements"
                );
                self.metadata = document.metadata;
                for statement in document.statements {
                    statements.insert(statement.key.clone(), statement);
                }
            }
            Some(_) => {
                warn!(path = %self.path.display(), "No valid statements found, using defaults");
            }
            None => {}
        }

        self.statements = Some(statements);
    }

    fn read_document(&self) -> Option<StatementDocument> {
        if !self.store.exists(&self.path) {
            warn!(path = %self.path.display(), "Statements file not found, using defaults");
            return None;
        }
        match self.store.read(&self.path) {
            Ok(content) => Some(parse_statement_document(&content)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read statements, using defaults"
                );
                None
            }
        }
    }

    fn loaded(&self) -> Result<&BTreeMap<String, TemplateStatement>, AppError> {
        self.statements.as_ref().ok_or(AppError::StatementsNotLoaded)
    }

    /// Content of `key`, or an empty string when the key is unknown.
    pub fn get(&self, key: &str) -> Result<String, AppError> {
        Ok(self.loaded()?.get(key).map(|statement| statement.content.clone()).unwrap_or_default())
    }

    /// Replace the content of an editable fragment in memory.
    ///
    /// Read-only fragments are reported as not found. Content may not hold
    /// `## ` lines, which would start a new block when the document is read.
    pub fn update(&mut self, key: &str, content: &str) -> Result<(), AppError> {
        let statements = self.statements.as_mut().ok_or(AppError::StatementsNotLoaded)?;
        let statement = statements
            .get_mut(key)
            .filter(|statement| statement.editable)
            .ok_or_else(|| AppError::StatementNotFound(key.to_string()))?;
        if content.trim().is_empty() {
            return Err(AppError::EmptyStatementContent);
        }
        if content.lines().any(|line| line.starts_with("## ")) {
            return Err(AppError::StatementContainsHeader);
        }

        statement.content = content.to_string();
        Ok(())
    }

    /// Rewrite the whole document in one atomic write.
    ///
    /// Default fragments come first in their canonical order, followed by any
    /// additional keys alphabetically.
    pub fn save(&self) -> Result<(), AppError> {
        let statements = self.loaded()?;

        let mut ordered: Vec<&TemplateStatement> =
            default_key_order().filter_map(|key| statements.get(key)).collect();
        ordered.extend(
            statements.values().filter(|statement| !default_key_order().any(|key| key == statement.key)),
        );

        let version = self.metadata.version.as_deref().unwrap_or(DEFAULT_DOCUMENT_VERSION);
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let document = render_statement_document(version, &today, &ordered)
            .map_err(|err| AppError::SaveStatements(err.to_string()))?;

        self.store
            .write_atomic(&self.path, &document)
            .map_err(|err| AppError::SaveStatements(err.to_string()))?;
        debug!(path = %self.path.display(), count = ordered.len(), "Saved statements");
        Ok(())
    }

    /// Copy the current document to `<file>.bak`.
    ///
    /// Returns `None` when there is no document to back up.
    pub fn backup(&self) -> Result<Option<PathBuf>, AppError> {
        if !self.store.exists(&self.path) {
            return Ok(None);
        }
        let target = backup_path(&self.path);
        self.store.copy(&self.path, &target).map_err(|err| AppError::Backup(err.to_string()))?;
        Ok(Some(target))
    }

    /// Snapshot of every fragment.
    pub fn all(&self) -> Result<BTreeMap<String, TemplateStatement>, AppError> {
        Ok(self.loaded()?.clone())
    }

    /// Discard in-memory changes and reinstate the built-in set.
    pub fn reset_to_defaults(&mut self) {
        self.statements = Some(default_statements());
    }
}

impl<D: DocumentStore> StatementSource for StatementManager<D> {
    fn statement(&self, key: &str) -> Result<String, AppError> {
        self.get(key)
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
