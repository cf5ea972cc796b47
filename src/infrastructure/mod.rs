//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// HTTP transport.
pub mod http;
/// Message bundle loading.
pub mod i18n;
/// Token storage adapters.
pub mod storage;

pub use config::{
    AppConfig, CliArgs, ConfigError, ConfigLoader, LoadedConfig, LogLevel, TokenStoreKind,
};
pub use http::ReqwestTransport;
pub use i18n::{I18nError, load_catalog};
pub use storage::{FileTokenStorage, KeyringTokenStorage};
