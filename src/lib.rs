//! Typed command bridge over the corebrain CLI.
//!
//! Operations are validated into an argument vector first; only a valid
//! call spawns a child process (`<interpreter> <script> <args...>`), and
//! its captured stderr decides between success and failure.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::{CommandBridge, PROCESS_TARGET};
pub use application::{BridgeError, BridgeResult};
pub use config::{BridgeConfig, Settings};
pub use domain::{ArgumentVector, Operation, OperationRequest, ValidationError};
