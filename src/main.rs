// ABOUTME: Main entry point for the Q&A admin
// ABOUTME: Initializes logging and config, opens the question store once, then dispatches the CLI

use anyhow::{Context, Result};
use clap::Parser;
use qa_admin::cli::{self, Cli};
use qa_admin::{config::Config, open_store, paths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_dir = paths::log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "qa-admin.log");
    let (file_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging: stderr for the operator, daily file for history
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qa_admin=info,qa_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    let config = Config::load()?;

    tracing::info!(
        remote = config.remote_enabled(),
        api_url = %config.remote.api_url,
        storage = %config.storage.path,
        timezone = %config.display.timezone,
        "Configuration loaded"
    );

    let store = open_store(&config)?;
    tracing::info!(backend = store.backend_name(), "Question store ready");

    cli::run(cli, config, store).await
}
