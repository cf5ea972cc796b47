//! Execution of parsed CLI commands against the application context.

use std::io::{self, Write};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::dto::{LoginCredentials, LoginOutcome};
use crate::domain::entities::{ItemId, ProjectId};
use crate::domain::errors::ApiError;
use crate::infrastructure::config::{Command, ItemsCommand};

use super::context::AppContext;
use super::output::write_json;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The API request failed.
    #[error("{}", .0.message())]
    Api(#[from] ApiError),
    /// `--data` is not JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// Login succeeded without a token in the response.
    #[error("login response did not contain a token")]
    MissingToken,
    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Api(ApiError::Status { .. }) => 3,
            Self::Api(ApiError::Transport { .. }) => 4,
            Self::Api(ApiError::InvalidRequest { .. }) | Self::InvalidPayload(_) => 2,
            Self::MissingToken => 5,
            Self::Io(_) => 1,
        }
    }

    /// Whether a notice was already queued for this failure.
    #[must_use]
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::Api(error) if error.is_notified())
    }
}

/// Runs one command, writing user-facing output to `out`.
///
/// # Errors
/// Returns error if the request fails, the payload is not JSON, or writing
/// output fails.
pub async fn run(
    ctx: &AppContext,
    command: Command,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    match command {
        Command::Login { login, password } => {
            let credentials = LoginCredentials::new(login, password);
            let response = ctx.session.login(&credentials).await?;
            let outcome = LoginOutcome::from_response(&response);

            if outcome.token.is_none() {
                writeln!(out, "{}", ctx.catalog.t("cli.login.no_token"))?;
                return Err(CommandError::MissingToken);
            }

            ctx.session.apply_login(outcome).await;
            writeln!(
                out,
                "{}",
                ctx.catalog
                    .t_with("cli.login.success", &[("login", credentials.login.as_str())])
            )?;
        }
        Command::Logout => {
            ctx.session.logout().await;
            writeln!(out, "{}", ctx.catalog.t("cli.logout.success"))?;
        }
        Command::Status => match ctx.session.token() {
            Some(token) => writeln!(
                out,
                "{}",
                ctx.catalog
                    .t_with("cli.status.logged_in", &[("token", token.masked().as_str())])
            )?,
            None => writeln!(out, "{}", ctx.catalog.t("cli.status.logged_out"))?,
        },
        Command::Items { action } => run_items(ctx, action, out).await?,
    }
    Ok(())
}

async fn run_items(
    ctx: &AppContext,
    action: ItemsCommand,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let store = &ctx.investments;
    match action {
        ItemsCommand::List { project } => {
            let response = store.fetch_all(&ProjectId::new(project)).await?;
            write_json(out, &response.body)?;
        }
        ItemsCommand::Create { project, data } => {
            let payload = parse_payload(&data)?;
            let response = store.create(&ProjectId::new(project), payload).await?;
            info!(resource = store.resource(), "Created record");
            write_json(out, &response.body)?;
        }
        ItemsCommand::Update { project, id, data } => {
            let payload = parse_payload(&data)?;
            let response = store
                .update(&ProjectId::new(project), &ItemId::new(id), payload)
                .await?;
            write_json(out, &response.body)?;
        }
        ItemsCommand::Delete { project, id } => {
            let (project, id) = (ProjectId::new(project), ItemId::new(id));
            store.remove(&project, &id).await?;
            writeln!(
                out,
                "{}",
                ctx.catalog.t_with(
                    "cli.items.deleted",
                    &[("id", id.as_str()), ("project", project.as_str())]
                )
            )?;
        }
    }
    Ok(())
}

fn parse_payload(data: &str) -> Result<Value, CommandError> {
    let payload = serde_json::from_str(data).map_err(CommandError::InvalidPayload)?;
    debug!("Parsed command payload");
    Ok(payload)
}
