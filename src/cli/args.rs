//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Typed command bridge over the corebrain CLI
#[derive(Parser, Debug)]
#[command(name = "cbridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Log level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Log the assembled invocation and captured streams
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interpreter executable (overrides config)
    #[arg(long, global = true, value_hint = ValueHint::ExecutablePath)]
    pub interpreter: Option<PathBuf>,

    /// Script passed to the interpreter (overrides config)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub script: Option<PathBuf>,

    /// Additional config file
    #[arg(long, global = true, env = "CBRIDGE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure the SDK
    Configure,

    /// List available configurations
    ListConfigs,

    /// Remove a configuration
    RemoveConfig,

    /// Show the schema of the configured database
    ShowSchema {
        /// Specific configuration ID
        #[arg(long)]
        config_id: Option<String>,
    },

    /// Extract the database schema to a file
    ExtractSchema {
        /// Specific configuration ID
        #[arg(long)]
        config_id: Option<String>,
        /// File to save the extracted schema
        #[arg(long, value_hint = ValueHint::FilePath)]
        output_file: Option<String>,
    },

    /// Show the external program's version
    Version,

    /// Show the external program's help
    Help,

    /// Store an API token
    SetToken {
        token: String,
    },

    /// Store an API key
    SetApiKey {
        key: String,
    },

    /// Set the API URL
    ApiUrl {
        #[arg(value_hint = ValueHint::Url)]
        url: String,
    },

    /// Set the SSO URL
    SsoUrl {
        #[arg(value_hint = ValueHint::Url)]
        url: String,
    },

    /// Log in with username/password or a token
    Login {
        #[arg(long, requires = "password", conflicts_with = "token")]
        username: Option<String>,
        #[arg(long, requires = "username", conflicts_with = "token")]
        password: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },

    /// Test authentication
    TestAuth {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Check service status
    CheckStatus {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Show the status of a task
    TaskStatus {
        task_id: String,
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Validate configuration (remote, or a local file with --file)
    ValidateConfig {
        /// Local config file to validate
        #[arg(long, value_hint = ValueHint::FilePath, conflicts_with_all = ["api_url", "token"])]
        file: Option<String>,
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Test the connection to the API
    TestConnection {
        #[command(flatten)]
        remote: RemoteArgs,
        /// Run full diagnostics
        #[arg(long)]
        full: bool,
    },

    /// Export configuration
    ExportConfig {
        /// Existing output directory
        #[arg(long, value_hint = ValueHint::DirPath)]
        output: Option<String>,
        /// Specific configuration ID
        #[arg(long, requires = "output")]
        config_id: Option<String>,
        /// Overwrite existing files
        #[arg(long, requires = "output")]
        overwrite: bool,
    },

    /// Pass a raw argument line through unchanged
    ///
    /// Arguments are joined with spaces and parsed with the bridge's quoting
    /// rules: `cbridge exec '--login --username "a b" --password x'`
    Exec {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
        args: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Optional endpoint and credential overrides.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct RemoteArgs {
    /// API URL (http/https)
    #[arg(long, value_hint = ValueHint::Url)]
    pub api_url: Option<String>,
    /// API token
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
