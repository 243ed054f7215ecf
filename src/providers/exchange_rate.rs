use crate::core::currency::{CurrencyRateProvider, RateError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rates from exchangerate-api.com (`/{key}/latest/{base}`).
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let api_key = self.api_key.as_deref().ok_or(RateError::MissingApiKey)?;

        debug!(
            "Requesting currency rate from {}/***/latest/{}",
            self.base_url, from
        );
        let url = format!("{}/{}/latest/{}", self.base_url, api_key, from);

        let client = reqwest::Client::builder()
            .user_agent("bollyinfo/1.0")
            .build()?;
        // Request URLs carry the API key, so errors are stripped of them
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            return Err(RateError::Http(response.status()));
        }

        let text = response.text().await.map_err(reqwest::Error::without_url)?;
        let data: LatestRatesResponse = serde_json::from_str(&text)?;

        if data.result != "success" {
            return Err(RateError::Unsuccessful(data.error_type.unwrap_or(data.result)));
        }

        let rate = data
            .conversion_rates
            .get(to)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| RateError::MissingCurrency(to.to_string()))?;

        debug!(rate, "Received {from}-{to} rate");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test-key/latest/USD"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "result": "success",
            "base_code": "USD",
            "conversion_rates": {"USD": 1, "EUR": 0.92, "INR": 83.12}
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), Some("test-key".into()));
        let rate = provider
            .get_rate("USD", "INR")
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, 83.12);
    }

    #[tokio::test]
    async fn test_unsuccessful_result() {
        let mock_response = r#"{"result": "error", "error-type": "quota-reached"}"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), Some("test-key".into()));
        let result = provider.get_rate("USD", "INR").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Rate service reported 'quota-reached'"
        );
    }

    #[tokio::test]
    async fn test_currency_missing_from_response() {
        let mock_response = r#"{"result": "success", "conversion_rates": {"EUR": 0.92}}"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), Some("test-key".into()));
        let result = provider.get_rate("USD", "INR").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate data found for currency: INR"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server(403, r#"{"result": "error"}"#).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), Some("test-key".into()));
        let result = provider.get_rate("USD", "INR").await;
        assert_eq!(result.unwrap_err().to_string(), "HTTP error: 403 Forbidden");
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(200, r#"{"rates": {}}"#).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), Some("test-key".into()));
        let result = provider.get_rate("USD", "INR").await;
        assert!(matches!(result, Err(RateError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:9", None);
        let result = provider.get_rate("USD", "INR").await;
        assert!(matches!(result, Err(RateError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let mock_server = MockServer::start().await;
        let base_url = mock_server.uri();
        drop(mock_server);

        let provider = ExchangeRateApiProvider::new(&base_url, Some("secret-rate-key".into()));
        let err = provider.get_rate("USD", "INR").await.unwrap_err();
        assert!(matches!(err, RateError::Transport(_)));
        assert!(!err.to_string().contains("secret-rate-key"));
    }
}
