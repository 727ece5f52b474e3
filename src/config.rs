//! Configuration: CLI arguments, config file, and merged client settings.
//!
//! Precedence, highest first: command-line flags, environment variables
//! (via clap), the TOML config file, built-in defaults. The config file
//! lives at `<config-dir>/tasksync/config.toml` unless `--config` points
//! elsewhere.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_NOTICE_BUFFER: usize = 32;

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// No API URL was supplied anywhere.
    #[error("no API URL configured (set --api-url, TASKS_API_URL, or [api].url)")]
    MissingApiUrl,
}

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "tasksync", about = "Synchronize tasks with a remote store", version)]
pub struct CliArgs {
    /// Base URL of the remote task store.
    #[arg(long, env = "TASKS_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TASKS_API_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    /// Path to a config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter.
    #[arg(long, env = "TASKSYNC_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do once connected.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all tasks (the default).
    List,
    /// Create a task.
    Add {
        /// Task name.
        name: String,
        /// Longer description.
        #[arg(long)]
        description: Option<String>,
        /// Initial status.
        #[arg(long, default_value = "pending")]
        status: String,
        /// Deadline as YYYY-MM-DD.
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Edit a task's fields.
    Edit {
        /// Id of the task to edit.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<String>,
        /// New deadline as YYYY-MM-DD, or empty to clear.
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Delete a task.
    Rm {
        /// Id of the task to delete.
        id: String,
    },
}

/// Raw config file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiFileConfig {
    notice_buffer: Option<usize>,
}

/// Fully resolved client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote task store.
    pub api_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Capacity of the notice channel.
    pub notice_buffer: usize,
    /// Log level filter for when `RUST_LOG` is unset.
    pub log_level: String,
}

impl ClientConfig {
    /// Load settings by merging CLI arguments over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly given config file cannot be
    /// read or parsed, or when no API URL is configured anywhere.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let api_url = cli
            .api_url
            .clone()
            .or_else(|| file.api.url.clone())
            .ok_or(ConfigError::MissingApiUrl)?;
        let request_timeout = cli
            .timeout_secs
            .or(file.api.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Ok(Self {
            api_url,
            request_timeout,
            notice_buffer: file.ui.notice_buffer.unwrap_or(DEFAULT_NOTICE_BUFFER),
            log_level: cli.log_level.clone(),
        })
    }
}

/// Read the config file, tolerating a missing default-location file.
fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(dir) = dirs::config_dir() else {
                return Ok(ConfigFile::default());
            };
            let path = dir.join("tasksync").join("config.toml");
            if !path.exists() {
                return Ok(ConfigFile::default());
            }
            path
        }
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
        path: path.clone(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}
