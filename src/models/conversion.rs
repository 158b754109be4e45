//! Conversion value types
//!
//! What a caller gets back from a rate lookup or an amount conversion.

use serde::Serialize;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Served from the persistent table
    Cache,
    /// Fetched from the remote rate provider on a miss
    Provider,
}

/// Result of converting an amount from base to target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub base: String,
    pub target: String,
    /// Amount in base currency as entered
    pub amount: f64,
    /// Rate used, target per one base
    pub rate: f64,
    /// `amount * rate`, unrounded
    pub converted: f64,
    pub source: RateSource,
    /// Why a freshly fetched rate could not be cached, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_warning: Option<String>,
}

impl Conversion {
    pub fn new(
        base: impl Into<String>,
        target: impl Into<String>,
        amount: f64,
        rate: f64,
        source: RateSource,
    ) -> Self {
        Self {
            base: base.into(),
            target: target.into(),
            amount,
            rate,
            converted: amount * rate,
            source,
            cache_warning: None,
        }
    }

    /// Attaches the reason a fetched rate was not persisted.
    pub fn with_cache_warning(mut self, warning: impl Into<String>) -> Self {
        self.cache_warning = Some(warning.into());
        self
    }

    /// Converted amount formatted with two decimals for display.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.converted)
    }
}
