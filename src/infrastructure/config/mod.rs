//! Application configuration.

/// Configuration values.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Configuration file loading.
pub mod loader;

pub use app_config::{AppConfig, LogLevel, TokenStoreKind};
pub use args::{CliArgs, Command, ItemsCommand};
pub use loader::{ConfigError, ConfigLoader, LoadedConfig};
