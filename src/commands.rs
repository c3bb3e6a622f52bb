//! Command handlers for wikiform
//!
//! Each handler reads its input whole (file or stdin), runs the codec, and
//! writes to stdout in the requested output format.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use wikiform_core::document::{describe, Document, SectionValue, Value};
use wikiform_core::error::{Result, WikiformError};
use wikiform_core::format::OutputFormat;

use crate::cli::{Cli, Commands};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        Commands::Parse { file } => parse(cli, file.as_deref(), start),
        Commands::Generate { file } => generate(cli, file.as_deref()),
        Commands::Normalize { file } => normalize(file.as_deref()),
        Commands::Metadata { file, keys } => metadata(cli, file.as_deref(), keys),
        Commands::Describe { file, length } => {
            let text = read_input(file)?;
            println!("{}", describe(&text, *length));
            Ok(())
        }
    }
}

fn parse(cli: &Cli, file: Option<&Path>, start: Instant) -> Result<()> {
    let text = read_input(&file.map(PathBuf::from))?;
    let doc = Document::parse(&text);
    debug!(elapsed = ?start.elapsed(), item_type = %doc.item_type, "parse_page");

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&doc)?),
        OutputFormat::Human => print_human(&doc),
    }
    Ok(())
}

fn generate(cli: &Cli, file: Option<&Path>) -> Result<()> {
    let input = read_input(&file.map(PathBuf::from))?;
    let doc = decode_document(&input)?;
    let text = doc.generate();
    debug!(len = text.len(), "generate_page");

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "text": text }))
        }
        OutputFormat::Human | OutputFormat::Yaml => println!("{}", text),
    }
    Ok(())
}

fn normalize(file: Option<&Path>) -> Result<()> {
    let text = read_input(&file.map(PathBuf::from))?;
    println!("{}", Document::parse(&text).generate());
    Ok(())
}

fn metadata(cli: &Cli, file: Option<&Path>, keys: &[String]) -> Result<()> {
    let text = read_input(&file.map(PathBuf::from))?;
    let recognized: Vec<&str> = keys.iter().map(String::as_str).collect();
    let (found, _) = wikiform_core::document::metadata::extract(&text, &recognized);
    debug!(keys = found.len(), "extract_metadata");

    match cli.format {
        OutputFormat::Human => {
            for (key, value) in &found {
                match value {
                    Some(value) => println!("{}: {}", key, value),
                    None => println!("{}", key),
                }
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let mut map = serde_json::Map::new();
            for (key, value) in found {
                // A bare key reads as a boolean flag.
                let value = match value {
                    Some(value) => serde_json::Value::String(value),
                    None => serde_json::Value::Bool(true),
                };
                map.insert(key, value);
            }
            let map = serde_json::Value::Object(map);
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                print!("{}", serde_yaml::to_string(&map)?);
            }
        }
    }
    Ok(())
}

/// Decode a serialized document, accepting JSON first and YAML as a fallback
fn decode_document(input: &str) -> Result<Document> {
    if let Ok(doc) = serde_json::from_str::<Document>(input) {
        return Ok(doc);
    }
    serde_yaml::from_str::<Document>(input).map_err(|e| WikiformError::InvalidDocument {
        reason: e.to_string(),
    })
}

fn read_input(file: &Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_human(doc: &Document) {
    println!("item type: {}", doc.item_type);

    if !doc.data.is_empty() {
        println!("data:");
        for (key, value) in doc.data.iter() {
            match value {
                Value::Scalar(s) => println!("  {}: {}", key, s),
                Value::List(items) => {
                    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                    println!("  {}: [{}]", key, items.join(", "));
                }
            }
        }
    }

    if !doc.sections.is_empty() {
        let names: Vec<String> = doc
            .sections
            .iter()
            .map(|(name, value)| match value {
                SectionValue::Text(_) => name.to_string(),
                SectionValue::Many(items) => format!("{} (x{})", name, items.len()),
            })
            .collect();
        println!("sections: {}", names.join(", "));
    }

    println!("body: {} chars", doc.body.chars().count());
}
