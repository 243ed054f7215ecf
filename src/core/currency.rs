//! Currency conversion abstractions

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a conversion rate could not be produced.
///
/// None of these are fatal to a lookup: callers treat any of them as
/// "conversion unavailable" and fall back to the upstream figure.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Exchange rate API key is not configured")]
    MissingApiKey,
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),
    #[error("Failed to parse rate response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Rate service reported '{0}'")]
    Unsuccessful(String),
    #[error("No rate data found for currency: {0}")]
    MissingCurrency(String),
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError>;
}
