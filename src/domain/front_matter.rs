//! YAML front-matter handling shared by the fragment and prompt documents.

use serde::de::DeserializeOwned;
use tracing::warn;

const DELIMITER: &str = "---";

/// Split `content` into its YAML front-matter block (without delimiters) and
/// the remaining body.
///
/// Returns `None` for the block when the document does not open with `---`
/// or the block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix(DELIMITER) else {
        return (None, trimmed);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, trimmed);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, trimmed)
}

/// Decode front-matter into `T`, falling back to `T::default()` when the
/// block is absent or malformed.
pub fn parse_front_matter<T>(content: &str) -> (T, &str)
where
    T: DeserializeOwned + Default,
{
    let (yaml, body) = split_front_matter(content);
    let metadata = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml).unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring malformed front-matter");
            T::default()
        }),
        _ => T::default(),
    };
    (metadata, body)
}
