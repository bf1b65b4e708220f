//! Files embedded in the binary at build time.

use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");
static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// Scaffold file holding the starter configuration.
pub const SCAFFOLD_CONFIG: &str = "config.toml";
/// Scaffold file holding the starter system prompt catalog.
pub const SCAFFOLD_SYSTEM_PROMPTS: &str = "prompt.ai-project.system.md";

/// Content of an embedded template by file name.
pub fn template_content(name: &str) -> Result<&'static str, AppError> {
    embedded_utf8(&TEMPLATES_DIR, name)
}

/// Content of an embedded scaffold file by file name.
pub fn scaffold_content(name: &str) -> Result<&'static str, AppError> {
    embedded_utf8(&SCAFFOLD_DIR, name)
}

fn embedded_utf8(dir: &'static Dir<'static>, name: &str) -> Result<&'static str, AppError> {
    dir.get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::config_error(format!("Missing embedded asset: {name}")))
}
