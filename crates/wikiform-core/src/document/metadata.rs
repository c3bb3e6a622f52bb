//! Dot-metadata line handling
//!
//! Pages may open with metadata lines of the form `.key` or `.key value`.
//! The `.schema` line names the item type and is consumed by parsing; every
//! other leading dot-line stays with the body so nothing the author wrote is
//! dropped, and generation emits the body with those lines still in place.

use std::sync::OnceLock;

use regex::Regex;

use super::DEFAULT_ITEM_TYPE;

/// Metadata key naming the item type
pub const SCHEMA_KEY: &str = "schema";

static DOT_LINE: OnceLock<Regex> = OnceLock::new();

fn dot_line_re() -> &'static Regex {
    DOT_LINE.get_or_init(|| {
        Regex::new(r"^\.(\S+)(?:\s+(.+))?$").expect("hardcoded metadata line pattern")
    })
}

/// Consume the leading dot-line run, resolving the item type
///
/// Leading blank lines are skipped (they would be trimmed from the body
/// anyway, and skipping them keeps one parse/generate pass a fixpoint).
/// Returns the item type (the sentinel default when no `.schema` line carries
/// a value) and the residual lines. Non-schema dot-lines are retained at the
/// head of the residual in their original order.
pub(crate) fn extract_item_type<'a>(lines: &[&'a str]) -> (String, Vec<&'a str>) {
    let mut item_type = DEFAULT_ITEM_TYPE.to_string();
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());

    let mut kept: Vec<&'a str> = Vec::new();
    let mut consumed = start;

    for line in &lines[start..] {
        let Some(caps) = dot_line_re().captures(line.trim()) else {
            break;
        };
        if &caps[1] == SCHEMA_KEY {
            item_type = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_ITEM_TYPE.to_string());
        } else {
            kept.push(line);
        }
        consumed += 1;
    }

    kept.extend(&lines[consumed..]);
    (item_type, kept)
}

/// Drop the whole leading dot-line run, schema or not
///
/// Used where the metadata lines must not surface at all, such as building a
/// plain-text description.
pub(crate) fn strip_leading<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines[start..]
        .iter()
        .position(|line| dot_line_re().captures(line.trim()).is_none())
        .map_or(lines.len(), |idx| start + idx);
    lines[end..].to_vec()
}

/// Pull recognized metadata out of a page's leading dot-line run
///
/// Each recognized `.key value` line becomes `(key, Some(value))`; a bare
/// `.key` becomes `(key, None)`. Unrecognized dot-lines are kept in place.
/// Returns the metadata in order of first appearance (a repeated key keeps
/// its first position with the last value) and the residual text.
pub fn extract(text: &str, recognized: &[&str]) -> (Vec<(String, Option<String>)>, String) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut metadata: Vec<(String, Option<String>)> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut consumed = 0;

    for line in &lines {
        let Some(caps) = dot_line_re().captures(line.trim()) else {
            break;
        };
        let key = &caps[1];
        if recognized.contains(&key) {
            let value = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            match metadata.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value,
                None => metadata.push((key.to_string(), value)),
            }
        } else {
            kept.push(line);
        }
        consumed += 1;
    }

    kept.extend(&lines[consumed..]);
    (metadata, kept.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn defaults_to_article_without_schema_line() {
        let input = lines("Hello\nthere?");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, DEFAULT_ITEM_TYPE);
        assert_eq!(residual, input);
    }

    #[test]
    fn schema_line_sets_item_type() {
        let input = lines(".schema Book\n\nHello");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, "Book");
        assert_eq!(residual, vec!["", "Hello"]);
    }

    #[test]
    fn valueless_schema_line_falls_back_to_default() {
        let input = lines(".schema\n\nHello");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, DEFAULT_ITEM_TYPE);
        assert_eq!(residual, vec!["", "Hello"]);
    }

    #[test]
    fn other_dot_lines_are_retained() {
        let input = lines(".schema Book\n.pub\n\nHello");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, "Book");
        assert_eq!(residual, vec![".pub", "", "Hello"]);
    }

    #[test]
    fn strip_leading_drops_the_whole_run() {
        let input = lines(".pub\n.schema Book\nHello\n.end");
        assert_eq!(strip_leading(&input), vec!["Hello", ".end"]);

        let input = lines("\n.pub\nHello");
        assert_eq!(strip_leading(&input), vec!["Hello"]);

        let input = lines("Hello\n.pub");
        assert_eq!(strip_leading(&input), vec!["Hello", ".pub"]);
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let input = lines("\n\n.schema Book\nHello");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, "Book");
        assert_eq!(residual, vec!["Hello"]);
    }

    #[test]
    fn run_stops_at_first_non_dot_line() {
        let input = lines("Hello\n.schema Book");
        let (item_type, residual) = extract_item_type(&input);
        assert_eq!(item_type, DEFAULT_ITEM_TYPE);
        assert_eq!(residual, input);
    }

    // Cases below exercise the recognized-key extraction helper.

    #[test]
    fn extract_nothing_from_empty_string() {
        let (metadata, body) = extract("", &["schema"]);
        assert!(metadata.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn extract_key_only_metadata() {
        let (metadata, body) = extract(".pub", &["pub"]);
        assert_eq!(metadata, vec![("pub".to_string(), None)]);
        assert_eq!(body, "");
    }

    #[test]
    fn extract_key_value_metadata() {
        let (metadata, body) = extract(".pub Test", &["pub"]);
        assert_eq!(metadata, vec![("pub".to_string(), Some("Test".to_string()))]);
        assert_eq!(body, "");
    }

    #[test]
    fn extract_leaves_unrecognized_lines_in_body() {
        let (metadata, body) = extract(".pub Test\n.schema Book\n\nHello", &["schema"]);
        assert_eq!(
            metadata,
            vec![("schema".to_string(), Some("Book".to_string()))]
        );
        assert_eq!(body, ".pub Test\n\nHello");
    }
}
