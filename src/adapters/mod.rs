pub mod assets;
mod filesystem_document_store;
pub mod statement_document;

pub use filesystem_document_store::FilesystemDocumentStore;
