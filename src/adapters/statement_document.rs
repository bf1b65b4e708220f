//! Rendering of the statements markdown document.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::domain::{AppError, TemplateStatement};

use super::assets;

const TEMPLATE_NAME: &str = "statements.md.j2";

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Serialize)]
struct DocumentContext<'a> {
    version: &'a str,
    last_updated: &'a str,
    statements: &'a [&'a TemplateStatement],
}

/// Render `statements`, in the given order, as a complete document with
/// front-matter.
pub fn render_statement_document(
    version: &str,
    last_updated: &str,
    statements: &[&TemplateStatement],
) -> Result<String, AppError> {
    let template = assets::template_content(TEMPLATE_NAME)?;
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    let context = DocumentContext { version, last_updated, statements };
    let rendered = env
        .render_str(template, &context)
        .map_err(|err| AppError::Template(format!("{TEMPLATE_NAME}: {err}")))?;
    Ok(format!("{}\n", rendered.trim_end()))
}
