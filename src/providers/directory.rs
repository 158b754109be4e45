//! Currency directory interface and the Open Exchange Rates client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::CurrencyDirectoryResponse;

/// Remote list of known currencies, keyed by code.
#[async_trait]
pub trait CurrencyDirectory: Send + Sync {
    async fn fetch_currency_codes(&self) -> Result<BTreeMap<String, String>, ProviderError>;
}

/// Client for the Open Exchange Rates `currencies.json` document.
#[derive(Debug, Clone)]
pub struct OpenExchangeRatesDirectory {
    client: Client,
    url: String,
}

impl OpenExchangeRatesDirectory {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CurrencyDirectory for OpenExchangeRatesDirectory {
    async fn fetch_currency_codes(&self) -> Result<BTreeMap<String, String>, ProviderError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(ProviderError::Status(resp.status().as_u16()));
        }

        let codes: CurrencyDirectoryResponse = resp.json().await?;
        debug!("Fetched {} currency codes", codes.len());
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_directory_is_request_error() {
        let client = crate::providers::http_client(std::time::Duration::from_secs(2)).unwrap();
        let directory = OpenExchangeRatesDirectory::new(client, "http://127.0.0.1:9/currencies.json");

        let result = directory.fetch_currency_codes().await;
        assert!(matches!(result, Err(ProviderError::Request(_))));
    }
}
