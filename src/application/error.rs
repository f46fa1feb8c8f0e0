//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::ValidationError;

/// Outcome classes of a bridge call.
///
/// `Validation` is always raised before a child process exists.
/// `ExternalProcess` covers everything after that point, spawn failures included.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    ExternalProcess {
        message: String,
        command_line: String,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl BridgeError {
    pub fn external(message: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self::ExternalProcess {
            message: message.into(),
            command_line: command_line.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The command line that triggered an external failure.
    pub fn command_line(&self) -> Option<&str> {
        match self {
            Self::ExternalProcess { command_line, .. } => Some(command_line),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
