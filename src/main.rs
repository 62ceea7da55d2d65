use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bankctl::api::{ApiError, Services};
use bankctl::cli::{run_command, Cli};
use bankctl::config::Config;
use bankctl::session::{Session, TokenStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    if let Some(api_url) = &cli.api_url {
        config.override_api_url(api_url);
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("bankctl v{}", env!("CARGO_PKG_VERSION"));

    let tokens = TokenStore::with_overlay(config.auth.token_file.clone(), cli.token.clone());
    let services = Services::connect(&config, tokens.clone())?;
    let mut session = Session::new(tokens);

    if cli.command.needs_session() {
        session.restore(&services.auth).await;
    }

    if let Err(err) = run_command(&cli, &services, &mut session).await {
        if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::SessionExpired)) {
            // The token was accepted at restore time but refused mid-command.
            session.logout().ok();
            eprintln!("Your session has expired. Please log in again with 'bankctl login <email>'.");
        } else {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }

    Ok(())
}
