//! # Transactions Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and the rate lookup client
//! - Create the transaction service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_rates::FreeCurrencyApi;
use transactions_hex::{TransactionService, inbound::HttpServer};
use transactions_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber (JSON lines on stdout)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,transactions_app=debug,transactions_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting transactions server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    if config.currency_api_key.is_empty() {
        tracing::warn!("CURRENCY_API_KEY is not set; currency conversion requests will fail");
    }
    let rates = FreeCurrencyApi::new(config.currency_api_key, config.rate_lookup_timeout)?
        .with_endpoint(config.currency_api_url);
    tracing::info!(
        endpoint = rates.endpoint(),
        timeout_secs = config.rate_lookup_timeout.as_secs(),
        "Rate lookup configured"
    );

    // Create the transaction service
    let service = TransactionService::new(repo, rates);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
