//! Error types and exit codes for wikiform
//!
//! The codec itself never fails; errors arise only at the tool boundary
//! (reading input, decoding a serialized document). Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (document that cannot be decoded)

use thiserror::Error;

/// Exit codes reported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - undecodable document input (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during wikiform operations
#[derive(Error, Debug)]
pub enum WikiformError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or yaml)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("invalid document: {reason}")]
    InvalidDocument { reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl WikiformError {
    /// Map this error to its CLI exit code
    pub fn exit_code(&self) -> ExitCode {
        match self {
            WikiformError::UnknownFormat(_) | WikiformError::UsageError(_) => ExitCode::Usage,
            WikiformError::InvalidDocument { .. } => ExitCode::Data,
            WikiformError::Io(_)
            | WikiformError::Yaml(_)
            | WikiformError::Json(_)
            | WikiformError::Other(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            WikiformError::UnknownFormat(_) => "unknown_format",
            WikiformError::UsageError(_) => "usage_error",
            WikiformError::InvalidDocument { .. } => "invalid_document",
            WikiformError::Io(_) => "io_error",
            WikiformError::Yaml(_) => "yaml_error",
            WikiformError::Json(_) => "json_error",
            WikiformError::Other(_) => "other",
        }
    }

    /// Structured error envelope for `--format json` consumers
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        })
    }
}

/// Result type alias for wikiform operations
pub type Result<T> = std::result::Result<T, WikiformError>;
