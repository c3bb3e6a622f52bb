//! Plain-text description of a page
//!
//! Strips the key/value blocks and the whole leading metadata run, then
//! reduces the body to its first line, cut at the last sentence boundary
//! reached within the length limit, with a hard cut and ellipsis as the
//! fallback.

use super::{data, metadata};

/// Build a short plain-text description from raw page text
pub fn describe(text: &str, max_length: usize) -> String {
    let text = text.replace("\r\n", "\n");
    let mut lines: Vec<&str> = text.split('\n').collect();

    // Every embedded block goes, not just the first. A malformed block is
    // left in place by extraction, so stop once nothing was removed.
    loop {
        let (_, rest) = data::extract(&lines);
        if rest.len() == lines.len() {
            break;
        }
        lines = rest;
    }
    let lines = metadata::strip_leading(&lines);

    let body = lines.join("\n");
    let first = body.trim().split('\n').next().unwrap_or("").trim();
    let chars: Vec<char> = first.chars().collect();

    // Walk sentence boundaries while the search start stays under the limit;
    // the last sentence kept may overrun it.
    let mut end = 0usize;
    while end < max_length {
        match find_sentence_end(&chars, end) {
            Some(next) => end = next + 1,
            None => break,
        }
    }
    if end > 3 {
        let cut: String = chars[..end].iter().collect();
        return cut.trim().to_string();
    }

    if chars.len() <= max_length {
        return first.to_string();
    }

    let cut: String = chars[..max_length.saturating_sub(3)].iter().collect();
    format!("{}...", cut.trim())
}

fn find_sentence_end(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&i| chars[i] == '.' && chars[i + 1] == ' ')
}
