//! Rate provider interface and the ExchangeRate-API client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::ProviderError;
use crate::models::PairResponse;

/// Remote source of exchange rates.
///
/// Implementations return the raw number the service reports; validation of
/// the value happens in the cache policy.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<f64, ProviderError>;
}

/// Client for the ExchangeRate-API pair endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ExchangeRateApi {
    /// Create a client against `base_url` (e.g. `https://v6.exchangerate-api.com/v6`).
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds `{base_url}/{api_key}/pair/{base}/{target}`.
    ///
    /// Each part is pushed as one percent-encoded path segment, so codes
    /// cannot alter the path or add a query.
    fn pair_url(&self, base: &str, target: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ProviderError::InvalidUrl(format!("{}: {}", self.base_url, err)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([self.api_key.as_str(), "pair", base, target]);
        Ok(url)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn fetch_rate(&self, base: &str, target: &str) -> Result<f64, ProviderError> {
        let url = self.pair_url(base, target)?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ProviderError::Status(resp.status().as_u16()));
        }

        let body: PairResponse = resp.json().await?;
        let rate = body.into_rate()?;
        debug!("Exchange rate from {} to {}: {}", base, target, rate);
        Ok(rate)
    }
}
