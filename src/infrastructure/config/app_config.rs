//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::services::DEFAULT_LOCALE;

pub(super) const APP_NAME: &str = "investdesk";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "investdesk";

const SESSION_FILE_NAME: &str = "session.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// `session.toml` in the data directory.
    #[default]
    File,
    /// System keyring.
    Keyring,
}

/// Application configuration from file, environment and CLI.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the API server.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Token persistence backend.
    #[serde(default)]
    pub token_store: TokenStoreKind,

    /// Session file override for the `file` token store.
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Active message locale.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Extra directory of `*.json` message bundles.
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base_url) = &args.api_base_url {
            self.api_base_url = Some(api_base_url.clone());
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(token_store) = args.token_store {
            self.token_store = token_store;
        }
        if let Some(locale) = &args.locale {
            self.locale = locale.clone();
        }
        if let Some(locales_dir) = &args.locales_dir {
            self.locales_dir = Some(locales_dir.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default session file path.
    #[must_use]
    pub fn default_session_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
    }

    /// Returns effective session file path.
    #[must_use]
    pub fn effective_session_path(&self) -> Option<PathBuf> {
        self.session_path.clone().or_else(Self::default_session_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::default(),
            api_base_url: None,
            request_timeout_secs: default_timeout_secs(),
            token_store: TokenStoreKind::default(),
            session_path: None,
            locale: default_locale(),
            locales_dir: None,
        }
    }
}
