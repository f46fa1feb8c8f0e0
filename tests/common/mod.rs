//! Shared test doubles for bridge tests

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use corebrain_bridge::config::{BridgeConfig, Settings};
use corebrain_bridge::infrastructure::traits::{CommandRunner, RealFileSystem};
use corebrain_bridge::CommandBridge;

/// One recorded spawn: program plus literal argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Command runner that records calls and replays a canned result.
#[derive(Debug, Default)]
pub struct MockRunner {
    pub calls: Mutex<Vec<Call>>,
    stdout: String,
    stderr: String,
    exit_code: i32,
    spawn_error: Option<String>,
}

impl MockRunner {
    pub fn ok(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    pub fn with_streams(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
            ..Self::default()
        }
    }

    pub fn failing_spawn(message: &str) -> Self {
        Self {
            spawn_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().expect("no call recorded")
    }

    /// Argv after the script path, i.e. what the operation built.
    pub fn last_operation_args(&self) -> Vec<String> {
        self.last_call().args.into_iter().skip(1).collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<Output> {
        self.calls.lock().unwrap().push(Call {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        if let Some(message) = &self.spawn_error {
            return Err(io::Error::new(io::ErrorKind::NotFound, message.clone()));
        }
        Ok(Output {
            status: exit_status(self.exit_code),
            stdout: self.stdout.clone().into_bytes(),
            stderr: self.stderr.clone().into_bytes(),
        })
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

pub fn test_config(verbose: bool) -> Arc<BridgeConfig> {
    let settings = Settings {
        interpreter: PathBuf::from("/usr/bin/python3"),
        script: PathBuf::from("/opt/corebrain/cli.py"),
        verbose,
    };
    Arc::new(BridgeConfig::resolve_against(&settings, Path::new("/")))
}

/// Bridge over a mock runner and the real filesystem.
pub fn mock_bridge(runner: MockRunner) -> (CommandBridge, Arc<MockRunner>) {
    let runner = Arc::new(runner);
    let bridge = CommandBridge::with_deps(test_config(false), runner.clone(), Arc::new(RealFileSystem));
    (bridge, runner)
}
