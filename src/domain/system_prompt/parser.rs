//! Section parsing for the system prompt document.
//!
//! Each prompt is a `##### Header` followed by one or more fenced
//! ```` ```markdown ```` blocks. Text before the first header is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::front_matter::parse_front_matter;

use super::model::{PromptFileMetadata, SystemPrompt, mapped_prompt_name, special_keys};

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##### (.+)$").expect("section header pattern must compile"));

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:markdown)?\s*\n((?s:.*?))\n```").expect("code block pattern must compile")
});

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("slug pattern must compile"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--+").expect("hyphen pattern must compile"));

static PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("parameter pattern must compile"));

/// Decode front-matter and every prompt section of a system prompt document.
pub fn parse_prompt_document(content: &str) -> (PromptFileMetadata, Vec<SystemPrompt>) {
    let (metadata, _) = parse_front_matter::<PromptFileMetadata>(content);
    (metadata, parse_prompt_sections(content))
}

/// Extract prompts from every `##### ` section, in document order.
///
/// Sections with an empty header or body are skipped.
pub fn parse_prompt_sections(content: &str) -> Vec<SystemPrompt> {
    let headers: Vec<_> = SECTION_HEADER.captures_iter(content).collect();

    let mut prompts = Vec::new();
    for (index, caps) in headers.iter().enumerate() {
        let (Some(whole), Some(header)) = (caps.get(0), caps.get(1)) else { continue };
        let end = headers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |m| m.start());

        let name = header.as_str().trim();
        let section = content[whole.end()..end].trim();
        if name.is_empty() || section.is_empty() {
            continue;
        }

        let body = extract_prompt_content(section);
        if body.is_empty() {
            continue;
        }

        prompts.push(SystemPrompt {
            name: name.to_string(),
            key: generate_key(name),
            parameters: extract_parameters(&body),
            content: body,
        });
    }
    prompts
}

/// Body of one section: fenced blocks joined by a blank line, or the raw text
/// from the first line that is not blank and not a bullet.
fn extract_prompt_content(section: &str) -> String {
    let blocks: Vec<&str> = CODE_BLOCK
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect();
    if !blocks.is_empty() {
        return blocks.join("\n\n");
    }

    let lines: Vec<&str> = section.lines().collect();
    let start = lines.iter().position(|line| {
        let line = line.trim();
        line.starts_with("```") || (!line.is_empty() && !line.starts_with('*'))
    });
    match start {
        Some(start) => lines[start..].join("\n").trim().to_string(),
        None => section.to_string(),
    }
}

/// Slug for a section header, e.g. `Slice Planning (Phase 3)` becomes
/// `slice-planning-phase-3`.
pub fn generate_key(header: &str) -> String {
    let lowered = header.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").trim().to_string()
}

/// Unique `{name}` placeholders in first-seen order.
pub fn extract_parameters(content: &str) -> Vec<String> {
    let mut parameters: Vec<String> = Vec::new();
    for caps in PARAMETER.captures_iter(content) {
        let name = &caps[1];
        if !parameters.iter().any(|existing| existing == name) {
            parameters.push(name.to_string());
        }
    }
    parameters
}

/// The context initialization prompt: reserved key, or a header mentioning
/// a model change or context refresh.
pub fn find_context_init(prompts: &[SystemPrompt]) -> Option<&SystemPrompt> {
    prompts.iter().find(|prompt| {
        let name = prompt.name.to_lowercase();
        prompt.key == special_keys::CONTEXT_INITIALIZATION
            || name.contains("model change")
            || name.contains("context refresh")
    })
}

/// The third-party tool prompt: reserved key, or a header mentioning tools.
pub fn find_tool_use(prompts: &[SystemPrompt]) -> Option<&SystemPrompt> {
    prompts.iter().find(|prompt| {
        let name = prompt.name.to_lowercase();
        prompt.key == special_keys::TOOL_USE
            || name.contains("3rd party tool")
            || name.contains("tool")
    })
}

/// The prompt for a development-phase instruction.
///
/// The mapped header wins on an exact name match; otherwise the first prompt
/// whose header or key contains the instruction is returned.
pub fn find_for_instruction<'a>(
    prompts: &'a [SystemPrompt],
    instruction: &str,
) -> Option<&'a SystemPrompt> {
    let needle = instruction.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = mapped_prompt_name(&needle)
        .and_then(|mapped| prompts.iter().find(|prompt| prompt.name == mapped));
    if exact.is_some() {
        return exact;
    }

    prompts
        .iter()
        .find(|prompt| prompt.name.to_lowercase().contains(&needle) || prompt.key.contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "---\nversion: \"2.0\"\nlastUpdated: \"2025-02-01\"\n---\n\n\
# Project Prompts\n\nPreamble that is ignored.\n\n\
##### Model Change or Context Refresh\n\n```markdown\nContext for {project} on slice {slice}.\n```\n\n\
##### Slice Planning (Phase 3)\n\n```markdown\nPlan the {slice} slice.\n```\n\n```markdown\nReview with {project}.\n```\n\n\
##### Use 3rd Party Tool\n\n* optional bullet\nConsult {tool} docs for {tool}.\n\n\
##### Empty Section\n";

    #[test]
    fn parses_sections_in_document_order() {
        let (metadata, prompts) = parse_prompt_document(DOCUMENT);

        assert_eq!(metadata.version.as_deref(), Some("2.0"));
        let names: Vec<&str> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Model Change or Context Refresh", "Slice Planning (Phase 3)", "Use 3rd Party Tool"]
        );
    }

    #[test]
    fn joins_multiple_fenced_blocks() {
        let prompts = parse_prompt_sections(DOCUMENT);

        assert_eq!(prompts[1].content, "Plan the {slice} slice.\n\nReview with {project}.");
        assert_eq!(prompts[1].parameters, vec!["slice", "project"]);
    }

    #[test]
    fn unfenced_body_skips_leading_bullets() {
        let prompts = parse_prompt_sections(DOCUMENT);

        assert_eq!(prompts[2].content, "Consult {tool} docs for {tool}.");
        assert_eq!(prompts[2].parameters, vec!["tool"]);
    }

    #[test]
    fn slugs_strip_punctuation_and_collapse_hyphens() {
        assert_eq!(generate_key("Slice Planning (Phase 3)"), "slice-planning-phase-3");
        assert_eq!(
            generate_key("Slice | Feature Implementation (Phase 7)"),
            "slice-feature-implementation-phase-7"
        );
        assert_eq!(generate_key("Use 3rd Party Tool"), "use-3rd-party-tool");
    }

    #[test]
    fn special_prompt_lookups_match_by_name() {
        let prompts = parse_prompt_sections(DOCUMENT);

        assert_eq!(
            find_context_init(&prompts).map(|p| p.name.as_str()),
            Some("Model Change or Context Refresh")
        );
        assert_eq!(find_tool_use(&prompts).map(|p| p.key.as_str()), Some("use-3rd-party-tool"));
        assert!(find_context_init(&prompts[1..]).is_none());
    }

    #[test]
    fn instruction_lookup_prefers_mapping_then_fuzzy() {
        let prompts = parse_prompt_sections(DOCUMENT);

        let upper = find_for_instruction(&prompts, "PLANNING").map(|p| p.key.clone());
        let lower = find_for_instruction(&prompts, "planning").map(|p| p.key.clone());
        assert_eq!(upper, Some("slice-planning-phase-3".to_string()));
        assert_eq!(upper, lower);

        assert_eq!(
            find_for_instruction(&prompts, "context refresh").map(|p| p.name.as_str()),
            Some("Model Change or Context Refresh")
        );
        assert!(find_for_instruction(&prompts, "deployment").is_none());
        assert!(find_for_instruction(&prompts, "").is_none());
    }

    #[test]
    fn fuzzy_match_takes_first_in_parse_order() {
        let prompts = parse_prompt_sections(
            "##### Analysis Processing\n\n```markdown\nfirst\n```\n\n\
             ##### Analysis Task Implementation\n\n```markdown\nsecond\n```\n",
        );

        let content = |instruction| find_for_instruction(&prompts, instruction).map(|p| p.content.as_str());
        assert_eq!(content("analysis task"), Some("second"));
        assert_eq!(content("analysis"), Some("first"));
    }
}
