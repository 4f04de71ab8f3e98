//! OpenLinkHub tray entry point.

mod app;
mod cli;
mod config;
mod desktop;
mod error;
mod poller;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting OpenLinkHub tray"
    );

    // Load configuration; the backend address is validated before any bus activity.
    let mut config = config::Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    let backend = config.backend_addr()?;
    tracing::info!(%backend, "configuration loaded");

    // Build and run the tokio runtime.
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config, backend))?;

    tracing::info!("tray shut down cleanly");
    Ok(())
}
