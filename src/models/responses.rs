//! Response DTOs for the remote services
//!
//! Defines the structure of the JSON bodies returned by the rate and
//! currency directory endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ProviderError;

/// Body of the pair endpoint (`GET /{key}/pair/{base}/{target}`)
///
/// Successful answers carry `result = "success"` and `conversion_rate`;
/// failures carry `result = "error"` and an `error-type` tag.
#[derive(Debug, Clone, Deserialize)]
pub struct PairResponse {
    /// "success" or "error"
    pub result: String,
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub target_code: Option<String>,
    /// Units of target per one unit of base
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(rename = "error-type", default)]
    pub error_type: Option<String>,
}

impl PairResponse {
    /// Extracts the rate, turning error documents into `ProviderError::Api`.
    ///
    /// The numeric value is not range-checked here; the cache policy decides
    /// what counts as a usable rate.
    pub fn into_rate(self) -> Result<f64, ProviderError> {
        if self.result != "success" {
            let reason = self
                .error_type
                .unwrap_or_else(|| format!("result was '{}'", self.result));
            return Err(ProviderError::Api(reason));
        }
        self.conversion_rate
            .ok_or_else(|| ProviderError::Decode("missing conversion_rate".to_string()))
    }
}

/// Body of the currency directory: a flat code -> display name map
pub type CurrencyDirectoryResponse = BTreeMap<String, String>;
