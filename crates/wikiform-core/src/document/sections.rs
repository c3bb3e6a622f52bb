//! Named section extraction and emission
//!
//! A line matching `<name>::---` (three or more dashes, whitespace-free name)
//! opens a section running to the next marker or the end of input. A name
//! used once yields a single text value; repeats accumulate into an ordered
//! list, and generation replays one marker block per list element.

use std::sync::OnceLock;

use regex::Regex;

use super::value::{SectionMap, SectionValue};

static SECTION_MARKER: OnceLock<Regex> = OnceLock::new();

fn section_marker_re() -> &'static Regex {
    SECTION_MARKER
        .get_or_init(|| Regex::new(r"^(\S+?)::-{3,}$").expect("hardcoded section marker pattern"))
}

fn marker_name(line: &str) -> Option<&str> {
    section_marker_re()
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}

/// Split sections off the line list
///
/// Everything strictly before the first marker is returned as the residual
/// (the provisional body); marker lines and their content are consumed.
/// Section content is trimmed of leading and trailing blank lines; a marker
/// with no content yields an empty string.
pub(crate) fn extract<'a>(lines: &[&'a str]) -> (SectionMap, Vec<&'a str>) {
    let Some(first) = lines.iter().position(|line| marker_name(line).is_some()) else {
        return (SectionMap::new(), lines.to_vec());
    };

    let mut sections = SectionMap::new();
    let mut name = marker_name(lines[first]).unwrap_or_default();
    let mut content: Vec<&str> = Vec::new();

    for line in &lines[first + 1..] {
        match marker_name(line) {
            Some(next) => {
                sections.push_section(name, join_trimmed(&content));
                name = next;
                content.clear();
            }
            None => content.push(line),
        }
    }
    sections.push_section(name, join_trimmed(&content));

    (sections, lines[..first].to_vec())
}

/// Join lines, dropping leading and trailing blank lines
pub(crate) fn join_trimmed(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |idx| idx + 1);
    lines[start..end].join("\n")
}

/// Append the section blocks to generated output
///
/// Each block is a marker line, a blank line, and the content, separated from
/// the preceding output by a blank line unless one is already there.
pub(crate) fn emit(sections: &SectionMap, out: &mut String) {
    for (name, value) in sections.iter() {
        match value {
            SectionValue::Text(content) => emit_one(out, name, content),
            SectionValue::Many(items) => {
                for content in items {
                    emit_one(out, name, content);
                }
            }
        }
    }
}

fn emit_one(out: &mut String, name: &str, content: &str) {
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
    }
    out.push_str(name);
    out.push_str("::---\n\n");
    out.push_str(content);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn no_markers_yield_no_sections() {
        let input = lines("Hello\nthere?");
        let (sections, residual) = extract(&input);
        assert!(sections.is_empty());
        assert_eq!(residual, input);
    }

    #[test]
    fn single_section_is_scalar() {
        let input = lines("Body\n\nnotes::---\nHello");
        let (sections, residual) = extract(&input);
        assert_eq!(
            sections.get("notes"),
            Some(&SectionValue::Text("Hello".into()))
        );
        assert_eq!(residual, vec!["Body", ""]);
    }

    #[test]
    fn repeated_name_collapses_to_list() {
        let input = lines("s1::---\nHello\n\ns1::---\nThere\n");
        let (sections, residual) = extract(&input);
        assert_eq!(
            sections.get("s1"),
            Some(&SectionValue::Many(vec!["Hello".into(), "There".into()]))
        );
        assert!(residual.is_empty());
    }

    #[test]
    fn marker_at_end_yields_empty_section() {
        let input = lines("Body\nempty::---");
        let (sections, _) = extract(&input);
        assert_eq!(sections.get("empty"), Some(&SectionValue::Text("".into())));
    }

    #[test]
    fn adjacent_markers_yield_empty_first_section() {
        let input = lines("a::---\nb::---\nContent");
        let (sections, _) = extract(&input);
        assert_eq!(sections.get("a"), Some(&SectionValue::Text("".into())));
        assert_eq!(sections.get("b"), Some(&SectionValue::Text("Content".into())));
    }

    #[test]
    fn marker_needs_three_dashes() {
        let input = lines("s::--\nHello");
        let (sections, residual) = extract(&input);
        assert!(sections.is_empty());
        assert_eq!(residual, input);

        let input = lines("s::----\nHello");
        let (sections, _) = extract(&input);
        assert_eq!(sections.get("s"), Some(&SectionValue::Text("Hello".into())));
    }

    #[test]
    fn marker_name_must_be_whitespace_free() {
        let input = lines("two words::---\nHello");
        let (sections, residual) = extract(&input);
        assert!(sections.is_empty());
        assert_eq!(residual, input);
    }

    #[test]
    fn content_is_trimmed_of_blank_lines() {
        let input = lines("s::---\n\n\nHello\nthere\n\n");
        let (sections, _) = extract(&input);
        assert_eq!(
            sections.get("s"),
            Some(&SectionValue::Text("Hello\nthere".into()))
        );
    }

    #[test]
    fn emit_replays_repeated_blocks_in_order() {
        let mut sections = SectionMap::new();
        sections.push_section("s1", "Hello");
        sections.push_section("s1", "There");

        let mut out = String::new();
        emit(&sections, &mut out);
        assert_eq!(out, "s1::---\n\nHello\n\ns1::---\n\nThere");
    }

    #[test]
    fn emit_separates_from_preceding_body() {
        let mut sections = SectionMap::new();
        sections.push_section("notes", "N");

        let mut out = String::from("Body");
        emit(&sections, &mut out);
        assert_eq!(out, "Body\n\nnotes::---\n\nN");
    }
}
