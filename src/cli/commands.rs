//! Command dispatch: CLI arguments → bridge operations

use std::io;
use std::sync::Arc;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::CommandBridge;
use crate::application::BridgeResult;
use crate::cli::args::{Cli, Commands, ConfigCommands, RemoteArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, BridgeConfig, Settings};

/// Run the parsed command line.
pub fn dispatch(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e))?;
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => run_config(cli, command),
        other => {
            let bridge = build_bridge(cli)?;
            let out = run_operation(&bridge, other)?;
            if !out.is_empty() {
                output::info(&out);
            }
            Ok(())
        }
    }
}

/// Settings → flags → resolved, immutable bridge config.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(interpreter) = &cli.interpreter {
        settings.interpreter = interpreter.clone();
    }
    if let Some(script) = &cli.script {
        settings.script = script.clone();
    }
    if cli.verbose {
        settings.verbose = true;
    }
    Ok(settings)
}

fn build_bridge(cli: &Cli) -> CliResult<CommandBridge> {
    let settings = load_settings(cli)?;
    let config = BridgeConfig::resolve(&settings)?;
    debug!("build_bridge: {:?}", config);
    Ok(CommandBridge::new(Arc::new(config)))
}

#[instrument(level = "debug", skip_all)]
fn run_operation(bridge: &CommandBridge, command: &Commands) -> CliResult<String> {
    let result: BridgeResult<String> = match command {
        Commands::Configure => bridge.configure(),
        Commands::ListConfigs => bridge.list_configs(),
        Commands::RemoveConfig => bridge.remove_config(),
        Commands::ShowSchema { config_id } => bridge.show_schema_for(config_id.as_deref()),
        Commands::ExtractSchema {
            config_id,
            output_file,
        } => bridge.extract_schema_to(config_id.as_deref(), output_file.as_deref()),
        Commands::Version => bridge.version(),
        Commands::Help => bridge.help(),
        Commands::SetToken { token } => bridge.set_token(token),
        Commands::SetApiKey { key } => bridge.set_api_key(key),
        Commands::ApiUrl { url } => bridge.api_url(url),
        Commands::SsoUrl { url } => bridge.sso_url(url),
        Commands::Login {
            username,
            password,
            token,
        } => match (username, password, token) {
            (_, _, Some(token)) => bridge.login_with_token(token),
            (Some(username), Some(password), None) => bridge.login(username, password),
            _ => {
                return Err(CliError::Usage(
                    "login requires --username and --password, or --token".into(),
                ))
            }
        },
        Commands::TestAuth { remote } => {
            let (api_url, token) = remote_parts(remote);
            bridge.test_auth(api_url, token)
        }
        Commands::CheckStatus { remote } => {
            let (api_url, token) = remote_parts(remote);
            bridge.check_status(api_url, token)
        }
        Commands::TaskStatus { task_id, remote } => {
            let (api_url, token) = remote_parts(remote);
            bridge.task_status(task_id, api_url, token)
        }
        Commands::ValidateConfig { file, remote } => match file {
            Some(path) => bridge.validate_config_file(path),
            None => {
                let (api_url, token) = remote_parts(remote);
                bridge.validate_config(api_url, token)
            }
        },
        Commands::TestConnection { remote, full } => {
            let (api_url, token) = remote_parts(remote);
            bridge.test_connection(api_url, token, *full)
        }
        Commands::ExportConfig {
            output,
            config_id,
            overwrite,
        } => match output {
            Some(dir) => bridge.export_config_to(dir, config_id.as_deref(), *overwrite),
            None => bridge.export_config(),
        },
        // One argument is a raw line to parse; several were already split by the shell.
        Commands::Exec { args } => match args.as_slice() {
            [line] => bridge.execute_raw(line),
            tokens => bridge.execute_args(tokens),
        },
        Commands::Config { .. } | Commands::Completion { .. } => {
            return Err(CliError::Usage("not a bridge operation".into()))
        }
    };
    Ok(result?)
}

fn remote_parts(remote: &RemoteArgs) -> (Option<&str>, Option<&str>) {
    (remote.api_url.as_deref(), remote.token.as_deref())
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    output::detail(&format!("global: {}{}", path.display(), state));
                }
                None => output::detail("global: unavailable (no home directory)"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("explicit: {}", path.display()));
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine global config directory".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
