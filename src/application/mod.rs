//! Application layer: argument building and the bridge service
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod builder;
pub mod error;
pub mod error_ext;
pub mod services;

pub use builder::build_arguments;
pub use error::{BridgeError, BridgeResult};
pub use error_ext::IoResultExt;
