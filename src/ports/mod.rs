mod document_store;
mod prompt_catalog;
mod statement_source;

pub use document_store::DocumentStore;
pub use prompt_catalog::PromptCatalog;
pub use statement_source::StatementSource;
