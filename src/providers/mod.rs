//! Providers Module
//!
//! Narrow interfaces to the remote services the client depends on, plus
//! their HTTP implementations.
//!
//! # Services
//! - Rate provider: one numeric rate for an ordered currency pair
//! - Currency directory: code -> display name map for currency pickers

mod directory;
mod rates;

pub use directory::{CurrencyDirectory, OpenExchangeRatesDirectory};
pub use rates::{ExchangeRateApi, RateProvider};

use std::time::Duration;

use reqwest::Client;

use crate::error::ProviderError;

/// Builds the shared HTTP client with a request timeout.
pub fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(client)
}
