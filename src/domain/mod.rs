//! Domain layer: operation table, argument vectors, validation
//!
//! This layer is independent of external concerns (no I/O, no process spawning, no config loading).

pub mod arguments;
pub mod error;
pub mod operation;
pub mod validation;

pub use arguments::{escape_quotes, join_tokens, split_command_line, Argument, ArgumentVector};
pub use error::ValidationError;
pub use operation::{Operation, OperationRequest, OperationSpec, ParamKind, ParamSpec, ParamValue};
pub use validation::{is_blank, require_http_url, require_non_blank};
