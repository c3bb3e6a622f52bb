//! Document codec for structured wiki pages
//!
//! A page body is a single text blob carrying up to four kinds of structure:
//! an item-type declaration (`.schema Book`), leading dot-metadata lines, an
//! embedded `#!yaml/schema` key/value block, named `name::---` sections, and
//! the remaining free text. [`Document::parse`] separates them;
//! [`Document::generate`] is its inverse.
//!
//! Parsing never fails: malformed or absent structure degrades to defaults.
//! For text already in generated form, `generate(parse(text)) == text`; for
//! arbitrary input one parse/generate pass reaches a fixpoint.

pub mod data;
mod describe;
pub mod metadata;
pub mod sections;
pub mod value;

use serde::{Deserialize, Serialize};

pub use describe::describe;
pub use value::{DataMap, OrderedMap, Scalar, SectionMap, SectionValue, Value};

/// Item type assumed when a page carries no `.schema` declaration
pub const DEFAULT_ITEM_TYPE: &str = "Article";

fn default_item_type() -> String {
    DEFAULT_ITEM_TYPE.to_string()
}

/// The structured record behind a wiki page body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Item type; never empty, `"Article"` when undeclared
    #[serde(default = "default_item_type")]
    pub item_type: String,
    /// Values from the embedded key/value block, in decode order
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub data: DataMap,
    /// Named free-text sections, in order of first appearance
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub sections: SectionMap,
    /// Remaining free text, trimmed of leading/trailing blank lines
    #[serde(default)]
    pub body: String,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            item_type: default_item_type(),
            data: DataMap::new(),
            sections: SectionMap::new(),
            body: String::new(),
        }
    }
}

impl Document {
    /// Parse raw page text into its structured record
    ///
    /// Four passes in a fixed order, each consuming lines and handing the
    /// residual to the next: key/value block, leading dot-metadata, named
    /// sections, body trimming. Total over all inputs.
    #[tracing::instrument(skip(text), fields(len = text.len()))]
    pub fn parse(text: &str) -> Self {
        let text = text.replace("\r\n", "\n");
        let lines: Vec<&str> = text.split('\n').collect();

        let (data, lines) = data::extract(&lines);
        let (item_type, lines) = metadata::extract_item_type(&lines);
        let (sections, lines) = sections::extract(&lines);
        let body = sections::join_trimmed(&lines);

        Document {
            item_type,
            data,
            sections,
            body,
        }
    }

    /// Generate page text that parses back to an equivalent record
    ///
    /// Emission order: item-type line (omitted for the default), key/value
    /// block, body, sections. Exactly one blank line separates consecutive
    /// parts. Dot-metadata lines other than `.schema` live inside `body` and
    /// are emitted with it, which keeps them where a re-parse will find them.
    pub fn generate(&self) -> String {
        let mut out = String::new();

        if self.item_type != DEFAULT_ITEM_TYPE {
            out.push('.');
            out.push_str(metadata::SCHEMA_KEY);
            out.push(' ');
            out.push_str(&self.item_type);
            out.push('\n');
        }

        if !self.data.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            for line in data::encode(&self.data) {
                out.push_str(&line);
                out.push('\n');
            }
        }

        let body = strip_leading_blank_lines(&self.body);
        if !body.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(body);
        }

        sections::emit(&self.sections, &mut out);

        out
    }
}

fn strip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            return rest;
        }
        rest = tail;
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}
