use std::collections::HashMap;

use crate::domain::AppError;
use crate::domain::statements::default_statements;
use crate::ports::StatementSource;

/// Statement source backed by a map.
#[derive(Default)]
pub struct FakeStatementSource {
    statements: HashMap<String, String>,
    unloaded: bool,
}

#[allow(dead_code)]
impl FakeStatementSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding the built-in statement set.
    pub fn defaults() -> Self {
        let statements =
            default_statements().into_iter().map(|(key, statement)| (key, statement.content)).collect();
        Self { statements, unloaded: false }
    }

    pub fn with(mut self, key: &str, content: &str) -> Self {
        self.statements.insert(key.to_string(), content.to_string());
        self
    }

    /// Every lookup fails as if the store was never loaded.
    pub fn unloaded() -> Self {
        Self { statements: HashMap::new(), unloaded: true }
    }
}

impl StatementSource for FakeStatementSource {
    fn statement(&self, key: &str) -> Result<String, AppError> {
        if self.unloaded {
            return Err(AppError::StatementsNotLoaded);
        }
        Ok(self.statements.get(key).cloned().unwrap_or_default())
    }
}
