//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary traits used by the bridge.

pub mod traits;

pub use traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};
