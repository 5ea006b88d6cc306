//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::DEFAULT_ENDPOINT;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RATE_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Empty when unset; conversions then fail upstream.
    pub currency_api_key: String,
    pub currency_api_url: String,
    pub rate_lookup_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number: {e}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let currency_api_key = var("CURRENCY_API_KEY").unwrap_or_default();
        let currency_api_url =
            var("CURRENCY_API_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_secs: u64 = match var("RATE_LOOKUP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                anyhow::anyhow!("RATE_LOOKUP_TIMEOUT_SECS must be a whole number of seconds: {e}")
            })?,
            None => DEFAULT_RATE_LOOKUP_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("RATE_LOOKUP_TIMEOUT_SECS must be at least 1 second");
        }

        Ok(Self {
            port,
            database_url,
            currency_api_key,
            currency_api_url,
            rate_lookup_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
