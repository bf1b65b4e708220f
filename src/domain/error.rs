use std::io;

use thiserror::Error;

/// Library-wide error type for context-forge operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Project record could not be decoded.
    #[error("Failed to parse project record: {0}")]
    ProjectParseError(#[from] serde_json::Error),

    /// Project record is missing data required for generation.
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    /// Fragment lookup or mutation attempted before `load_statements`.
    #[error("Statements not loaded. Call load_statements() first.")]
    StatementsNotLoaded,

    /// Fragment key is unknown or not editable.
    #[error("Statement '{0}' not found")]
    StatementNotFound(String),

    /// Fragment update carried blank content.
    #[error("Statement content cannot be empty")]
    EmptyStatementContent,

    /// Fragment update carried a line the document parser reads as a new block.
    #[error("Statement content cannot contain '## ' header lines")]
    StatementContainsHeader,

    /// Fragment document could not be written.
    #[error("Failed to save statements: {0}")]
    SaveStatements(String),

    /// Fragment document backup could not be written.
    #[error("Failed to create backup: {0}")]
    Backup(String),

    /// System prompt file could not be read or validated.
    #[error("System prompt file error: {0}")]
    PromptFile(String),

    /// No system prompt matched the requested key.
    #[error("System prompt '{0}' not found")]
    PromptNotFound(String),

    /// Generation input lacks required fields.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    /// Template syntax or rendering failure.
    #[error("Template error: {0}")]
    Template(String),

    /// Target file already exists and would be overwritten.
    #[error("File already exists: {0}")]
    FileExists(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParseError(_)
            | AppError::ProjectParseError(_)
            | AppError::InvalidProject(_)
            | AppError::EmptyStatementContent
            | AppError::StatementContainsHeader
            | AppError::MissingRequiredFields(_)
            | AppError::Template(_) => io::ErrorKind::InvalidInput,
            AppError::StatementNotFound(_) | AppError::PromptNotFound(_) => {
                io::ErrorKind::NotFound
            }
            AppError::FileExists(_) => io::ErrorKind::AlreadyExists,
            AppError::StatementsNotLoaded
            | AppError::SaveStatements(_)
            | AppError::Backup(_)
            | AppError::PromptFile(_) => io::ErrorKind::Other,
        }
    }
}
