use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use investdesk::domain::ports::TokenStoragePort;
use investdesk::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, FileTokenStorage, KeyringTokenStorage, LoadedConfig,
    ReqwestTransport, TokenStoreKind, load_catalog,
};
use investdesk::presentation::{self, AppContext, render_notifications};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .init();
    }

    Ok(())
}

fn token_storage(config: &AppConfig) -> Result<Arc<dyn TokenStoragePort>> {
    match config.token_store {
        TokenStoreKind::File => {
            let path = config
                .effective_session_path()
                .ok_or_else(|| eyre!("failed to determine session file location"))?;
            Ok(Arc::new(FileTokenStorage::new(path)))
        }
        TokenStoreKind::Keyring => Ok(Arc::new(KeyringTokenStorage::new()?)),
    }
}

async fn create_context(config: LoadedConfig) -> Result<AppContext> {
    let LoadedConfig { app, api } = config;
    let catalog = load_catalog(&app.locale, app.locales_dir.as_deref())
        .wrap_err("failed to load message bundles")?;
    let transport = Arc::new(ReqwestTransport::from_config(&api)?);
    let storage = token_storage(&app)?;

    Ok(AppContext::new(api, transport, storage, catalog).await)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = ConfigLoader::new()?.load(&args)?;

    init_logging(&config.app)?;
    info!(version = investdesk::VERSION, "Starting {}", investdesk::NAME);

    let ctx = create_context(config).await?;
    let result = presentation::run(&ctx, args.command, &mut io::stdout().lock()).await;

    render_notifications(&mut io::stderr().lock(), &ctx.notifications, &ctx.catalog)?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            if !error.is_notified() {
                eprintln!(
                    "{}",
                    ctx.catalog
                        .t_with("cli.notice.error", &[("message", error.to_string().as_str())])
                );
            }
            Ok(ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1)))
        }
    }
}
