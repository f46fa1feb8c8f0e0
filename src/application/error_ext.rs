//! Error conversion helpers for spawn results
//!
//! Provides extension traits for mapping I/O failures into the external-process class.

use std::io;

use crate::application::{BridgeError, BridgeResult};

/// Extension trait for converting `io::Result` to `BridgeResult` with invocation context.
pub trait IoResultExt<T> {
    /// Classify an I/O error as an external process failure.
    ///
    /// # Example
    /// ```ignore
    /// runner.run(&program, &args)
    ///     .with_invocation_context(&command_line)?;
    /// ```
    fn with_invocation_context(self, command_line: &str) -> BridgeResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_invocation_context(self, command_line: &str) -> BridgeResult<T> {
        self.map_err(|e| BridgeError::external(format!("failed to start process: {e}"), command_line))
    }
}
