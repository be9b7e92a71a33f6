//! Error types and exit codes for memepack
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, encoding)
//! - 2: Usage error (bad flags/args, invalid config values)
//! - 3: Data error (no usable source roots, unreadable config)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing sources, unreadable config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while aggregating packs
#[derive(Error, Debug)]
pub enum MemepackError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("no usable source roots (skipped {skipped})")]
    NoSources { skipped: usize },

    #[error("config not readable at {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to {operation} {path:?}: {source}")]
    IoAt {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl MemepackError {
    /// Attach the failing operation and path to an I/O error
    pub fn io_at(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MemepackError::IoAt {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        MemepackError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MemepackError::UsageError(_) | MemepackError::InvalidValue { .. } => ExitCode::Usage,

            MemepackError::NoSources { .. } | MemepackError::InvalidConfig { .. } => {
                ExitCode::Data
            }

            MemepackError::Io(_)
            | MemepackError::IoAt { .. }
            | MemepackError::Json(_)
            | MemepackError::Toml(_)
            | MemepackError::Other(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            MemepackError::UsageError(_) => "usage_error",
            MemepackError::InvalidValue { .. } => "invalid_value",
            MemepackError::NoSources { .. } => "no_sources",
            MemepackError::InvalidConfig { .. } => "invalid_config",
            MemepackError::Io(_) | MemepackError::IoAt { .. } => "io_error",
            MemepackError::Json(_) => "json_error",
            MemepackError::Toml(_) => "toml_error",
            MemepackError::Other(_) => "other",
        }
    }

    /// Convert error to a JSON envelope for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for memepack operations
pub type Result<T> = std::result::Result<T, MemepackError>;
