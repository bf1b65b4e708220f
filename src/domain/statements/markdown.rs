//! Parsing of the statements markdown document.
//!
//! Layout:
//!
//! ```text
//! ---
//! version: "1.0.0"
//! lastUpdated: "2025-01-27"
//! ---
//!
//! ## Project Intro Statement
//! <!-- key: project-intro-statement, editable: true -->
//!
//! Body text...
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::domain::front_matter::parse_front_matter;

use super::model::{StatementFileMetadata, TemplateStatement};

static METADATA_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<!--\s*key:\s*([\w-]+)\s*,\s*editable:\s*((?i:true|false))\s*-->$")
        .expect("metadata comment pattern must compile")
});

const HEADER_PREFIX: &str = "## ";

/// A parsed statements document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDocument {
    pub metadata: StatementFileMetadata,
    /// Statements in document order.
    pub statements: Vec<TemplateStatement>,
}

/// Parse a statements document.
///
/// Headers without a well-formed metadata comment on their first non-blank
/// line are skipped.
pub fn parse_statement_document(content: &str) -> StatementDocument {
    let (metadata, body) = parse_front_matter::<StatementFileMetadata>(content);

    let mut statements = Vec::new();
    for (header, lines) in header_blocks(body) {
        match parse_block(header, &lines) {
            Some(statement) => statements.push(statement),
            None => warn!(header, "Skipping statement section without metadata comment"),
        }
    }

    StatementDocument { metadata, statements }
}

fn header_blocks(body: &str) -> Vec<(&str, Vec<&str>)> {
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in body.lines() {
        if let Some(header) = line.strip_prefix(HEADER_PREFIX) {
            blocks.push((header.trim(), Vec::new()));
        } else if let Some((_, lines)) = blocks.last_mut() {
            lines.push(line);
        }
    }
    blocks
}

fn parse_block(header: &str, lines: &[&str]) -> Option<TemplateStatement> {
    let first = lines.iter().position(|line| !line.trim().is_empty())?;
    let caps = METADATA_COMMENT.captures(lines[first].trim())?;

    let key = caps[1].to_string();
    let editable = caps[2].eq_ignore_ascii_case("true");
    let content = lines[first + 1..].join("\n").trim().to_string();

    Some(TemplateStatement { key, content, description: header.to_string(), editable })
}
