//! I/O boundary traits for testability
//!
//! These traits abstract process spawning and filesystem checks, allowing
//! the bridge to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::Output;

/// Filesystem checks needed for argument validation.
pub trait FileSystem: Send + Sync {
    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Spawn `program` with literal `args`, wait for exit, capture both streams.
    ///
    /// No shell is involved and stdin is closed.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output> {
        use std::process::{Command, Stdio};

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW
            cmd.creation_flags(0x0800_0000);
        }

        // Drains both pipes concurrently.
        cmd.output()
    }
}
