//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Rejections raised before any child process is spawned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{param} cannot be empty or whitespace")]
    Blank { param: String },

    #[error("{param}: invalid URL format: {value}")]
    InvalidUrl { param: String, value: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("{operation} does not take parameter {param}")]
    UnknownParam { operation: String, param: String },

    #[error("{param} expects a {expected} value")]
    TypeMismatch { param: String, expected: String },

    #[error("unterminated quote in argument line: {0}")]
    UnterminatedQuote(String),
}

impl ValidationError {
    /// Name of the offending parameter, if the error is tied to one.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Blank { param }
            | Self::InvalidUrl { param, .. }
            | Self::UnknownParam { param, .. }
            | Self::TypeMismatch { param, .. } => Some(param),
            _ => None,
        }
    }
}
