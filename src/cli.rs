//! CLI argument parsing for wikiform
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json.
//! Input for every subcommand is a file path, `-` or nothing for stdin.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use wikiform_core::format::OutputFormat;

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Wikiform - codec between wiki page text and its structured record
#[derive(Parser, Debug)]
#[command(name = "wikiform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "WIKIFORM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse page text into its structured record
    Parse {
        /// Input file (stdin when absent or `-`)
        file: Option<PathBuf>,
    },

    /// Generate page text from a serialized record (JSON or YAML)
    Generate {
        /// Input file (stdin when absent or `-`)
        file: Option<PathBuf>,
    },

    /// Canonicalize page text (parse, then generate)
    Normalize {
        /// Input file (stdin when absent or `-`)
        file: Option<PathBuf>,
    },

    /// Extract recognized dot-metadata lines from page text
    Metadata {
        /// Input file (stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Metadata key to recognize (repeatable)
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
    },

    /// Print a short plain-text description of a page
    Describe {
        /// Input file (stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Maximum description length in characters
        #[arg(long, default_value_t = 200)]
        length: usize,
    },
}
