//! Exchange Rates Library
//!
//! Looks up live conversion rates from the freecurrencyapi.com "latest"
//! endpoint:
//!
//! ```text
//! GET <endpoint>?apikey=<key>&currencies=<target>&base_currency=<source>
//! -> { "data": { "<TARGET>": <rate> } }
//! ```
//!
//! Every lookup is a fresh round trip: no caching, no retries. The only
//! guard is the request timeout the caller hands to [`FreeCurrencyApi::new`].
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use exchange_rates::FreeCurrencyApi;
//! use transactions_types::Currency;
//!
//! # async fn demo() -> Result<(), transactions_types::ExchangeError> {
//! let api = FreeCurrencyApi::new("my-key", Duration::from_secs(5))?;
//! let eur = Currency::new("EUR").unwrap();
//! let rate = api.lookup(&Currency::usd(), &eur, "my-key").await?;
//! println!("1 USD = {rate} EUR");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use transactions_types::{Currency, ExchangeError, ExchangeRateProvider};

/// Public endpoint of the rate provider.
pub const DEFAULT_ENDPOINT: &str = "https://api.freecurrencyapi.com/v1/latest";

/// Response envelope of the "latest" endpoint.
#[derive(Debug, Deserialize)]
struct LatestRates {
    data: HashMap<String, f64>,
}

/// HTTP client for the freecurrencyapi.com latest-rates endpoint.
#[derive(Debug, Clone)]
pub struct FreeCurrencyApi {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl FreeCurrencyApi {
    /// Creates a client whose every request is bounded by `timeout`.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ExchangeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Points the client at a different endpoint (self-hosted mirror, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Returns the endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the rate converting one unit of `from` into `to`.
    #[tracing::instrument(skip_all, fields(from = %from, to = %to))]
    pub async fn lookup(
        &self,
        from: &Currency,
        to: &Currency,
        api_key: &str,
    ) -> Result<f64, ExchangeError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("apikey", api_key),
                ("currencies", to.as_str()),
                ("base_currency", from.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to get response from currency API");
                ExchangeError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read response body");
            ExchangeError::Read(e.to_string())
        })?;

        tracing::debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "Currency API response"
        );

        let rates: LatestRates = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(status = status.as_u16(), error = %e, "JSON decoding failed");
            ExchangeError::Decode(format!("HTTP {status}: {e}"))
        })?;

        match rates.data.get(to.as_str()) {
            Some(rate) => Ok(*rate),
            None => {
                let err = ExchangeError::RateNotFound {
                    from: from.clone(),
                    to: to.clone(),
                };
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }
}

#[async_trait::async_trait]
impl ExchangeRateProvider for FreeCurrencyApi {
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, ExchangeError> {
        self.lookup(from, to, &self.api_key).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
