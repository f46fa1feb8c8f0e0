//! Command execution bridge
//!
//! Typed operations over the external corebrain CLI. Every call runs in two
//! phases: a pure validation phase that builds the argument vector, then a
//! single blocking child process whose captured streams decide the result.
//!
//! Success means stderr was empty. Any stderr output is reported as an
//! `ExternalProcess` error, whatever the exit code; the exit code itself is
//! only logged.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::builder::build_arguments;
use crate::application::{BridgeError, BridgeResult, IoResultExt};
use crate::config::BridgeConfig;
use crate::domain::{
    is_blank, join_tokens, split_command_line, ArgumentVector, Operation, OperationRequest,
    ValidationError,
};
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, RealCommandRunner, RealFileSystem,
};

/// Log target for the invocation and captured streams in verbose mode.
pub const PROCESS_TARGET: &str = "corebrain_bridge::process";

/// Bridge between typed operation calls and the external program.
pub struct CommandBridge {
    config: Arc<BridgeConfig>,
    cmd: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
}

impl CommandBridge {
    /// Create a bridge with real process and filesystem implementations.
    pub fn new(config: Arc<BridgeConfig>) -> Self {
        Self::with_deps(config, Arc::new(RealCommandRunner), Arc::new(RealFileSystem))
    }

    /// Create a bridge with custom dependencies (for testing).
    pub fn with_deps(
        config: Arc<BridgeConfig>,
        cmd: Arc<dyn CommandRunner>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self { config, cmd, fs }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Validate a request without spawning anything.
    pub fn prepare(&self, request: &OperationRequest) -> BridgeResult<ArgumentVector> {
        Ok(build_arguments(request, self.fs.as_ref())?)
    }

    /// Validate, then execute.
    pub fn run(&self, request: &OperationRequest) -> BridgeResult<String> {
        let argv = self.prepare(request)?;
        self.spawn(argv.to_args(), &argv.command_line())
    }

    /// Execute a pre-assembled argument line.
    ///
    /// The line is split with the same quoting rules used for rendering,
    /// so `--flag "a \"b\""` reaches the child as `--flag` and `a "b"`.
    pub fn execute_command(&self, argument_line: &str) -> BridgeResult<String> {
        let args = split_command_line(argument_line)?;
        self.spawn(args, argument_line)
    }

    /// Host pass-through: like [`execute_command`](Self::execute_command) but
    /// rejects a blank line.
    pub fn execute_raw(&self, argument_line: &str) -> BridgeResult<String> {
        if is_blank(argument_line) {
            return Err(blank_arguments());
        }
        self.execute_command(argument_line)
    }

    /// Host pass-through for tokens that are already split (e.g. by a shell).
    ///
    /// Tokens reach the child verbatim; nothing is rendered and re-parsed.
    pub fn execute_args(&self, tokens: &[String]) -> BridgeResult<String> {
        if tokens.iter().all(|t| is_blank(t)) {
            return Err(blank_arguments());
        }
        self.spawn(tokens.to_vec(), &join_tokens(tokens))
    }

    #[instrument(level = "debug", skip_all)]
    fn spawn(&self, args: Vec<String>, command_line: &str) -> BridgeResult<String> {
        let program = self.config.interpreter();
        let script = self.config.script();
        let invocation = format!("{} \"{}\" {}", program.display(), script.display(), command_line);

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(script.to_string_lossy().into_owned());
        argv.extend(args);

        if self.config.verbose() {
            info!(target: PROCESS_TARGET, "exec: {}", invocation.trim_end());
        }

        let output = self
            .cmd
            .run(program, &argv)
            .with_invocation_context(command_line)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if self.config.verbose() {
            info!(target: PROCESS_TARGET, "stdout: {}", stdout);
            info!(target: PROCESS_TARGET, "stderr: {}", stderr);
        }
        debug!("spawn: exit status {:?}", output.status.code());

        if !stderr.is_empty() {
            return Err(BridgeError::external(stderr.into_owned(), command_line));
        }

        Ok(stdout.trim_end().to_string())
    }

    // ============================================================
    // Operations without parameters
    // ============================================================

    pub fn configure(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::Configure))
    }

    pub fn list_configs(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::ListConfigs))
    }

    pub fn remove_config(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::RemoveConfig))
    }

    pub fn show_schema(&self) -> BridgeResult<String> {
        self.show_schema_for(None)
    }

    /// Show the schema of a specific configuration.
    pub fn show_schema_for(&self, config_id: Option<&str>) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::ShowSchema).maybe_text("config_id", config_id))
    }

    pub fn extract_schema(&self) -> BridgeResult<String> {
        self.extract_schema_to(None, None)
    }

    /// Extract the schema, optionally for one configuration and into a given file.
    pub fn extract_schema_to(
        &self,
        config_id: Option<&str>,
        output_file: Option<&str>,
    ) -> BridgeResult<String> {
        self.run(
            &OperationRequest::new(Operation::ExtractSchema)
                .maybe_text("config_id", config_id)
                .maybe_text("output_file", output_file),
        )
    }

    pub fn version(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::Version))
    }

    pub fn help(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::Help))
    }

    // ============================================================
    // Credentials and endpoints
    // ============================================================

    pub fn set_token(&self, token: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::SetToken).text("token", token))
    }

    pub fn set_api_key(&self, key: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::SetApiKey).text("api_key", key))
    }

    pub fn api_url(&self, url: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::ApiUrl).text("url", url))
    }

    pub fn sso_url(&self, url: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::SsoUrl).text("url", url))
    }

    pub fn login(&self, username: &str, password: &str) -> BridgeResult<String> {
        self.run(
            &OperationRequest::new(Operation::Login)
                .text("username", username)
                .text("password", password),
        )
    }

    pub fn login_with_token(&self, token: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::LoginWithToken).text("token", token))
    }

    // ============================================================
    // Remote checks (optional api_url / token are omitted when None)
    // ============================================================

    /// `test_auth(None, None)` assumes an already-authenticated session.
    pub fn test_auth(&self, api_url: Option<&str>, token: Option<&str>) -> BridgeResult<String> {
        self.run(&remote_request(Operation::TestAuth, api_url, token))
    }

    pub fn check_status(&self, api_url: Option<&str>, token: Option<&str>) -> BridgeResult<String> {
        self.run(&remote_request(Operation::CheckStatus, api_url, token))
    }

    pub fn task_status(
        &self,
        task_id: &str,
        api_url: Option<&str>,
        token: Option<&str>,
    ) -> BridgeResult<String> {
        let request = OperationRequest::new(Operation::TaskStatus).text("task_id", task_id);
        self.run(
            &request
                .maybe_text("api_url", api_url)
                .maybe_text("token", token),
        )
    }

    pub fn validate_config(
        &self,
        api_url: Option<&str>,
        token: Option<&str>,
    ) -> BridgeResult<String> {
        self.run(&remote_request(Operation::ValidateConfig, api_url, token))
    }

    /// Validate a local config file; the path must be an existing file.
    pub fn validate_config_file(&self, path: &str) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::ValidateConfigFile).text("path", path))
    }

    pub fn test_connection(
        &self,
        api_url: Option<&str>,
        token: Option<&str>,
        full_diagnostics: bool,
    ) -> BridgeResult<String> {
        self.run(
            &remote_request(Operation::TestConnection, api_url, token)
                .switch("full_diagnostics", full_diagnostics),
        )
    }

    /// Export using the external program's default location.
    pub fn export_config(&self) -> BridgeResult<String> {
        self.run(&OperationRequest::new(Operation::ExportConfig))
    }

    /// Export configuration into an existing directory.
    pub fn export_config_to(
        &self,
        output_directory: &str,
        config_id: Option<&str>,
        overwrite: bool,
    ) -> BridgeResult<String> {
        self.run(
            &OperationRequest::new(Operation::ExportConfigTo)
                .text("output_directory", output_directory)
                .maybe_text("config_id", config_id)
                .switch("overwrite", overwrite),
        )
    }
}

fn blank_arguments() -> BridgeError {
    ValidationError::Blank {
        param: "arguments".into(),
    }
    .into()
}

fn remote_request(operation: Operation, api_url: Option<&str>, token: Option<&str>) -> OperationRequest {
    OperationRequest::new(operation)
        .maybe_text("api_url", api_url)
        .maybe_text("token", token)
}
