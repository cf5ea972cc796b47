//! Presentation layer: command execution and terminal output.

/// CLI command execution.
pub mod commands;
/// Application wiring.
pub mod context;
/// Terminal rendering.
pub mod output;

pub use commands::{CommandError, run};
pub use context::AppContext;
pub use output::{render_notifications, write_json};
