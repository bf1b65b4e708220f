mod output;
mod processor;

pub use output::normalize_output;
pub use processor::TemplateProcessor;
