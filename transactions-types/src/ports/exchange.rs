//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, mock providers, etc.

use crate::Currency;

/// Error type for exchange rate operations.
///
/// Every variant is final: lookups are never retried.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The provider could not be reached (includes timeouts).
    #[error("Failed to reach currency API: {0}")]
    Transport(String),

    #[error("Failed to read currency API response: {0}")]
    Read(String),

    #[error("Failed to decode currency API response: {0}")]
    Decode(String),

    #[error("Conversion rate for {from} to {to} not found")]
    RateNotFound { from: Currency, to: Currency },
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Get the exchange rate from one currency to another.
    /// Returns how many units of `to` currency you get for 1 unit of `from` currency.
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, ExchangeError>;
}
