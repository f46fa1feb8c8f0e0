//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/corebrain-bridge/bridge.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `CBRIDGE_*` prefix
//!
//! CLI flags are applied by the caller on top of the loaded [`Settings`].
//! [`BridgeConfig`] is the resolved, immutable result handed to the bridge.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::BridgeError;

pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_SCRIPT: &str = "corebrain/cli/__main__.py";

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub interpreter: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub verbose: Option<bool>,
}

/// User-facing settings before path resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Interpreter executable (bare names are resolved on PATH at startup)
    pub interpreter: PathBuf,
    /// Script or command file passed as the first argument
    pub script: PathBuf,
    /// Log the invocation and captured streams
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            script: PathBuf::from(DEFAULT_SCRIPT),
            verbose: false,
        }
    }
}

/// Get the XDG config directory for the bridge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "corebrain-bridge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bridge.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, BridgeError> {
    let content = std::fs::read_to_string(path).map_err(|e| BridgeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| BridgeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input untouched.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            interpreter: overlay
                .interpreter
                .clone()
                .unwrap_or_else(|| self.interpreter.clone()),
            script: overlay.script.clone().unwrap_or_else(|| self.script.clone()),
            verbose: overlay.verbose.unwrap_or(self.verbose),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, BridgeError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("load: explicit config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CBRIDGE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, BridgeError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CBRIDGE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("interpreter") {
            settings.interpreter = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("script") {
            settings.script = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("verbose") {
            settings.verbose = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        self.interpreter = expand_path(&self.interpreter);
        self.script = expand_path(&self.script);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, BridgeError> {
        toml::to_string_pretty(self).map_err(|e| BridgeError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# corebrain-bridge configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/corebrain-bridge/bridge.toml
#   Explicit: cbridge --config <file>
#   Env:      CBRIDGE_INTERPRETER, CBRIDGE_SCRIPT, CBRIDGE_VERBOSE
#
# Relative paths are resolved against the working directory at startup.
# Bare interpreter names (no path separator) are resolved on PATH once.

# interpreter = "{DEFAULT_INTERPRETER}"
# script = "{DEFAULT_SCRIPT}"
# verbose = false
"#
        )
    }
}

fn config_err(e: ConfigError) -> BridgeError {
    BridgeError::Config {
        message: e.to_string(),
    }
}

/// Resolved, immutable bridge configuration.
///
/// Shared by reference (`Arc`) between bridge instances; never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    interpreter: PathBuf,
    script: PathBuf,
    verbose: bool,
}

impl BridgeConfig {
    /// Resolve settings against the current working directory.
    pub fn resolve(settings: &Settings) -> Result<Self, BridgeError> {
        let cwd = std::env::current_dir().map_err(|e| BridgeError::Config {
            message: format!("current directory: {e}"),
        })?;
        Ok(Self::resolve_against(settings, &cwd))
    }

    /// Resolve settings against an explicit base directory.
    pub fn resolve_against(settings: &Settings, base: &Path) -> Self {
        let interpreter = if is_bare_program_name(&settings.interpreter) {
            resolve_on_path(&settings.interpreter)
        } else {
            absolutize(&settings.interpreter, base)
        };
        let script = absolutize(&settings.script, base);

        debug!(
            "resolve: interpreter={}, script={}, verbose={}",
            interpreter.display(),
            script.display(),
            settings.verbose
        );

        Self {
            interpreter,
            script,
            verbose: settings.verbose,
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// `python3` yes, `./python3` or `bin/python3` no.
fn is_bare_program_name(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.components().count() == 1 && path.is_relative()
}

/// Absolute PATH match, or the bare name when there is none so the spawn
/// reports the failure.
fn resolve_on_path(name: &Path) -> PathBuf {
    match which::which(name) {
        Ok(found) => found,
        Err(e) => {
            debug!("resolve_on_path: {} not found: {}", name.display(), e);
            name.to_path_buf()
        }
    }
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    // Drop `.` components; `..` is left for the OS since symlinks may be involved.
    joined
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
