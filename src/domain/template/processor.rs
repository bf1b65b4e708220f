use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{error, warn};

use crate::domain::AppError;
use crate::domain::context_data::TemplateData;

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+(\w+)\}\}(.*?)\{\{else\}\}(.*?)\{\{/if\}\}")
        .expect("conditional pattern must compile")
});

static DOUBLE_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(\w+)\}\}").expect("variable pattern must compile")
});

static SINGLE_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^}]+)\}").expect("expression pattern must compile")
});

static IF_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{#if\s+\w+\}\}").expect("if pattern must compile")
});

/// Substitutes `{{var}}`, `{expr}` and `{{#if var}}…{{else}}…{{/if}}` forms.
///
/// Deliberately small: no loops, no nesting, no filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateProcessor;

impl TemplateProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Render `template` against `data`, never failing.
    ///
    /// A failed lookup returns the untouched template with a trailing
    /// diagnostic line instead of an error.
    pub fn process_template(&self, template: &str, data: &impl TemplateData) -> String {
        match self.try_process(template, data) {
            Ok(processed) => processed,
            Err(err) => {
                error!(error = %err, "Error processing template");
                format!("{template}\n\n[Error processing template: {err}]")
            }
        }
    }

    /// Render `template` against `data`, surfacing lookup failures.
    pub fn try_process(&self, template: &str, data: &impl TemplateData) -> Result<String, AppError> {
        let resolved = resolve_conditionals(template, data);
        let resolved = resolve_variables(&resolved, data)?;
        resolve_expressions(&resolved, data)
    }

    /// Check that braces and `{{#if}}`/`{{/if}}` markers are balanced.
    pub fn validate_template(&self, template: &str) -> bool {
        let open = template.matches("{{").count();
        let close = template.matches("}}").count();
        if open != close {
            return false;
        }

        let if_open = IF_OPEN.find_iter(template).count();
        let if_close = template.matches("{{/if}}").count();
        if_open == if_close
    }
}

fn resolve_conditionals(template: &str, data: &impl TemplateData) -> String {
    CONDITIONAL
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            let truthy = match data.lookup(name) {
                Ok(value) => value.is_some_and(|value| value.is_truthy()),
                Err(err) => {
                    warn!(variable = name, error = %err, "Error evaluating conditional");
                    false
                }
            };
            if truthy { caps[2].to_string() } else { caps[3].to_string() }
        })
        .into_owned()
}

fn resolve_variables(template: &str, data: &impl TemplateData) -> Result<String, AppError> {
    replace_fallible(&DOUBLE_BRACE, template, |caps| {
        let name = &caps[1];
        match data.lookup(name)? {
            Some(value) => Ok(value.render()),
            None => {
                warn!(
                    variable = name,
                    "Template variable not found in data, replacing with empty string"
                );
                Ok(String::new())
            }
        }
    })
}

fn resolve_expressions(template: &str, data: &impl TemplateData) -> Result<String, AppError> {
    replace_fallible(&SINGLE_BRACE, template, |caps| {
        let expression = &caps[1];
        let name = match expression.split_once(" | ") {
            Some((primary, _hint)) => primary.trim(),
            None => expression,
        };
        let name = if name == "project" { "projectName" } else { name };

        // Unknown names may belong to downstream prompt text; keep them verbatim.
        Ok(match data.lookup(name)? {
            Some(value) => value.render(),
            None => caps[0].to_string(),
        })
    })
}

fn replace_fallible<F>(pattern: &Regex, input: &str, mut replace: F) -> Result<String, AppError>
where
    F: FnMut(&Captures) -> Result<String, AppError>,
{
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for caps in pattern.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&input[last..whole.start()]);
        output.push_str(&replace(&caps)?);
        last = whole.end();
    }
    output.push_str(&input[last..]);
    Ok(output)
}
