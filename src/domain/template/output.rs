use std::sync::LazyLock;

use regex::Regex;

static CARRIAGE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+\n").expect("line-ending pattern must compile"));

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:[ \t]*\n){2,}").expect("blank-run pattern must compile")
});

/// Final cleanup applied to every generated context.
///
/// Converts CRLF to LF, collapses runs of blank lines to a single blank line
/// and trims the ends.
pub fn normalize_output(content: &str) -> String {
    let unix = CARRIAGE_RETURNS.replace_all(content, "\n");
    BLANK_RUN.replace_all(&unix, "\n\n").trim().to_string()
}
