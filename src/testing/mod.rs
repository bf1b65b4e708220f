mod fake_prompt_catalog;
mod fake_statement_source;
mod memory_document_store;

pub use fake_prompt_catalog::FakePromptCatalog;
pub use fake_statement_source::FakeStatementSource;
pub use memory_document_store::MemoryDocumentStore;
