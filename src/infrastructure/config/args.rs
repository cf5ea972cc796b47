use super::app_config::{LogLevel, TokenStoreKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "investdesk",
    version,
    about = "Command-line client for the project investment API",
    long_about = None
)]
/// Command-line arguments.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the API server.
    #[arg(long, value_name = "URL", env = "INVESTDESK_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "INVESTDESK_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Token persistence backend.
    #[arg(long, value_enum, global = true)]
    pub token_store: Option<TokenStoreKind>,

    /// Message locale, such as `uk_UA` or `en`.
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Extra directory of `*.json` message bundles.
    #[arg(long, value_name = "DIR", global = true)]
    pub locales_dir: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token.
    Login {
        /// Account login.
        #[arg(long)]
        login: String,

        /// Account password.
        #[arg(long, env = "INVESTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session token.
    Logout,
    /// Show whether a session token is stored.
    Status,
    /// Manage project investment items.
    Items {
        #[command(subcommand)]
        action: ItemsCommand,
    },
}

/// Investment item commands.
#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    /// List the investment items of a project.
    List {
        /// Project identifier.
        project: String,
    },
    /// Create an investment item from a JSON object.
    Create {
        /// Project identifier.
        project: String,

        /// JSON payload.
        #[arg(long)]
        data: String,
    },
    /// Replace an investment item with a JSON object.
    Update {
        /// Project identifier.
        project: String,

        /// Item identifier.
        id: String,

        /// JSON payload.
        #[arg(long)]
        data: String,
    },
    /// Delete an investment item.
    Delete {
        /// Project identifier.
        project: String,

        /// Item identifier.
        id: String,
    },
}
