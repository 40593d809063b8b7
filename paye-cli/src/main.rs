use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use paye_cli::app;
use paye_cli::cli::Cli;
use paye_cli::config::AppConfig;
use paye_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .apply(cli.overrides());

    // RUST_LOG wins over the config file but not over --log-level.
    logging::init_logging(&config.logging, cli.log_level.is_none())?;
    debug!(?config, "resolved configuration");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    app::run(&cli.command, &config, &mut stdout, stdin.lock()).await
}
