//! Generate command implementation.

use std::path::Path;

use crate::app::api::GenerateOptions;
use crate::domain::AppError;

pub fn run_generate(project: &Path, legacy: bool, mcp_servers: Vec<String>) -> Result<(), AppError> {
    let options = GenerateOptions { legacy, mcp_servers };
    let context = crate::app::api::generate_context(project, &options)?;
    println!("{}", context);
    Ok(())
}
