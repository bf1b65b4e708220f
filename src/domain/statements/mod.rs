pub mod defaults;
mod markdown;
mod model;

pub use defaults::{DEFAULT_DOCUMENT_VERSION, default_key_order, default_statements};
pub use markdown::{StatementDocument, parse_statement_document};
pub use model::{StatementFileMetadata, TemplateStatement};
