//! Layered configuration loading: file, then environment and flags.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use super::app_config::AppConfig;
use super::args::CliArgs;
use crate::application::services::ApiClientConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

const CONFIG_TEMPLATE: &str = r#"# investdesk configuration
#
# Every key is optional here; INVESTDESK_* variables and command-line flags
# take precedence.

# api_base_url = "https://api.example.com"
# request_timeout_secs = 30
# log_level = "warn"
# token_store = "file"
# locale = "uk_UA"
# locales_dir = "/path/to/locales"
"#;

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no configuration directory.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// No base URL in any layer.
    #[error("no API base URL configured; set api_base_url or INVESTDESK_API_BASE_URL")]
    MissingBaseUrl,
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    /// Reading or creating the file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration after every layer has been applied and validated.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Merged application settings.
    pub app: AppConfig,
    /// Validated client settings derived from `app`.
    pub api: ApiClientConfig,
}

/// Resolves and loads `config.toml`.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Uses the platform configuration directory.
    ///
    /// # Errors
    /// Returns error if the platform has no configuration directory.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::in_dir)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses `config_dir` instead of the platform directory.
    #[must_use]
    pub const fn in_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// The file `load` reads: `--config` when given, else `config.toml` in
    /// the configuration directory.
    #[must_use]
    pub fn config_path(&self, args: &CliArgs) -> PathBuf {
        args.config
            .clone()
            .unwrap_or_else(|| self.config_dir.join(CONFIG_FILE_NAME))
    }

    /// Reads the file, applies flags and environment, and validates the
    /// API settings.
    ///
    /// A missing default file is created from a commented template. An
    /// explicit `--config` path must exist.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or the base URL is
    /// missing or invalid.
    pub fn load(&self, args: &CliArgs) -> Result<LoadedConfig, ConfigError> {
        let path = self.config_path(args);
        let mut app = if args.config.is_none() && !path.exists() {
            write_template(&path)?;
            AppConfig::default()
        } else {
            read_file(&path)?
        };

        app.config = Some(path);
        app.merge_with_args(args);

        let api = client_config(&app)?;
        debug!(base_url = %api.base_url(), locale = %app.locale, "Configuration loaded");
        Ok(LoadedConfig { app, api })
    }
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_template(path: &Path) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(CONFIG_TEMPLATE.as_bytes()).map_err(io_error)?;
            info!(path = %path.display(), "Wrote configuration template");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(io_error(e)),
    }
}

fn client_config(app: &AppConfig) -> Result<ApiClientConfig, ConfigError> {
    let base_url = app
        .api_base_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingBaseUrl)?;

    let config = ApiClientConfig::parse(base_url)
        .map_err(|e| ConfigError::InvalidBaseUrl(e.message().to_string()))?;
    if !matches!(config.base_url().scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(format!(
            "unsupported scheme in '{base_url}'"
        )));
    }

    Ok(config.with_timeout(Duration::from_secs(app.request_timeout_secs)))
}
