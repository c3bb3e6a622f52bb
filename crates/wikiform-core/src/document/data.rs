//! Embedded key/value block extraction and emission
//!
//! A page may carry one structured data block: a line of four spaces (or one
//! tab) followed by `#!yaml/schema`, then further indented lines holding a
//! YAML mapping. Parsing removes the whole block from the text; generation
//! emits it back between the metadata head and the body.

use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::warn;

use super::value::{DataMap, Scalar, Value};

/// Marker token opening the key/value block
pub const BLOCK_MARKER: &str = "#!yaml/schema";

static BLOCK_OPEN: OnceLock<Regex> = OnceLock::new();

fn block_open_re() -> &'static Regex {
    BLOCK_OPEN.get_or_init(|| {
        Regex::new(r"^(?: {4}|\t)#!yaml/schema[ \t]*$").expect("hardcoded block marker pattern")
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_indented(line: &str) -> bool {
    (line.starts_with("    ") || line.starts_with('\t')) && !is_blank(line)
}

/// Extract the key/value block from `lines`
///
/// Returns the decoded data and the residual lines with the block (and the
/// blank lines trailing it) removed. A block that fails to decode as a YAML
/// mapping is treated as absent data and left in the text untouched, so no
/// author input is lost.
pub(crate) fn extract<'a>(lines: &[&'a str]) -> (DataMap, Vec<&'a str>) {
    let Some(open) = lines.iter().position(|line| block_open_re().is_match(line)) else {
        return (DataMap::new(), lines.to_vec());
    };

    // Collect indented block lines. Blank lines inside the block are kept as
    // long as another indented line follows; blanks after the last indented
    // line leave the text together with the block.
    let mut content: Vec<&str> = Vec::new();
    let mut end = open + 1;
    while end < lines.len() {
        if is_indented(lines[end]) {
            content.push(lines[end]);
            end += 1;
            continue;
        }
        if !is_blank(lines[end]) {
            break;
        }
        let mut after = end;
        while after < lines.len() && is_blank(lines[after]) {
            after += 1;
        }
        if after < lines.len() && is_indented(lines[after]) {
            content.extend(&lines[end..after]);
            end = after;
        } else {
            end = after;
            break;
        }
    }

    let yaml_text = deindent(&content);

    let mut residual: Vec<&'a str> = Vec::with_capacity(lines.len());
    residual.extend(&lines[..open]);
    residual.extend(&lines[end..]);

    // Empty block: present but holds nothing.
    if yaml_text.trim().is_empty() {
        return (DataMap::new(), residual);
    }

    match serde_yaml::from_str::<YamlValue>(&yaml_text) {
        Ok(YamlValue::Mapping(mapping)) => (decode_mapping(&mapping), residual),
        Ok(_) | Err(_) => {
            // Not a mapping, or not YAML at all: leave the block in the body.
            (DataMap::new(), lines.to_vec())
        }
    }
}

/// Strip the one level of block indentation, normalizing tabs to four spaces
fn deindent(content: &[&str]) -> String {
    let mut out = String::new();
    for line in content {
        let line = line.replace('\t', "    ");
        out.push_str(line.strip_prefix("    ").unwrap_or(&line));
        out.push('\n');
    }
    out
}

fn decode_mapping(mapping: &Mapping) -> DataMap {
    let mut data = DataMap::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        if let Some(value) = decode_value(value) {
            data.insert(key, value);
        }
    }
    data
}

fn decode_value(value: &YamlValue) -> Option<Value> {
    match value {
        YamlValue::Sequence(items) => {
            Value::from_scalars(items.iter().filter_map(decode_scalar).collect())
        }
        other => decode_scalar(other).map(Value::Scalar),
    }
}

fn decode_scalar(value: &YamlValue) -> Option<Scalar> {
    match value {
        YamlValue::Bool(b) => Some(Scalar::Bool(*b)),
        YamlValue::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        YamlValue::String(s) if s.is_empty() => None,
        YamlValue::String(s) if s.eq_ignore_ascii_case("true") => Some(Scalar::Bool(true)),
        YamlValue::String(s) if s.eq_ignore_ascii_case("false") => Some(Scalar::Bool(false)),
        YamlValue::String(s) => Some(Scalar::Str(s.clone())),
        _ => None,
    }
}

/// Encode a non-empty data map as block lines: the marker line followed by
/// the YAML mapping, every line indented by four spaces
pub(crate) fn encode(data: &DataMap) -> Vec<String> {
    let mut mapping = Mapping::new();
    for (key, value) in data.iter() {
        mapping.insert(YamlValue::String(key.to_string()), encode_value(value));
    }

    let yaml = match serde_yaml::to_string(&mapping) {
        Ok(yaml) => yaml,
        Err(e) => {
            warn!(error = %e, "failed to encode data block");
            return Vec::new();
        }
    };

    let mut out = vec![format!("    {}", BLOCK_MARKER)];
    for line in yaml.lines() {
        if line.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("    {}", line));
        }
    }
    out
}

fn encode_value(value: &Value) -> YamlValue {
    match value {
        Value::Scalar(s) => encode_scalar(s),
        Value::List(items) => YamlValue::Sequence(items.iter().map(encode_scalar).collect()),
    }
}

fn encode_scalar(scalar: &Scalar) -> YamlValue {
    match scalar {
        Scalar::Bool(b) => YamlValue::Bool(*b),
        Scalar::Int(i) => YamlValue::Number((*i).into()),
        Scalar::Float(x) => YamlValue::Number((*x).into()),
        Scalar::Str(s) => YamlValue::String(s.clone()),
    }
}
