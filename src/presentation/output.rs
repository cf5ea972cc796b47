//! Terminal rendering of API bodies and queued notices.

use std::io::{self, Write};

use serde_json::Value;

use crate::application::services::{MessageCatalog, NotificationCenter};

/// Writes a response body as pretty JSON. `null` bodies print nothing.
///
/// # Errors
/// Returns error if writing fails.
pub fn write_json(out: &mut dyn Write, body: &Value) -> io::Result<()> {
    if body.is_null() {
        return Ok(());
    }
    let text = serde_json::to_string_pretty(body).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

/// Drains the notice queue into `out` and returns how many were written.
///
/// # Errors
/// Returns error if writing fails.
pub fn render_notifications(
    out: &mut dyn Write,
    notifications: &NotificationCenter,
    catalog: &MessageCatalog,
) -> io::Result<usize> {
    let drained = notifications.drain();
    for message in &drained {
        writeln!(
            out,
            "{}",
            catalog.t_with("cli.notice.error", &[("message", message.as_str())])
        )?;
    }
    Ok(drained.len())
}
