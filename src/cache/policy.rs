//! Rate Policy Module
//!
//! Lookup-or-fetch orchestration over the rate store and the remote provider.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, DEFAULT_FETCH_TIMEOUT};
use crate::error::{ConversionError, StoreError};
use crate::models::{Conversion, RateSource};
use crate::providers::RateProvider;
use crate::store::{validate_code, validate_rate, SharedStore};

// == Resolution ==
/// A resolved rate plus how it was obtained.
#[derive(Debug)]
pub struct Resolution {
    /// Units of target per one unit of base
    pub rate: f64,
    pub source: RateSource,
    /// Set when the rate was fetched but could not be cached
    pub cache_warning: Option<StoreError>,
}

// == Rate Policy ==
/// Serves rates from the store, falling back to the provider on a miss.
///
/// A stored rate is returned regardless of its age. Freshness is bounded only
/// by the retention sweeper removing old records.
pub struct RatePolicy {
    store: SharedStore,
    provider: Arc<dyn RateProvider>,
    fetch_timeout: Duration,
    stats: Arc<Mutex<CacheStats>>,
}

impl RatePolicy {
    // == Constructor ==
    /// Creates a policy over an injected store handle and provider.
    pub fn new(store: SharedStore, provider: Arc<dyn RateProvider>) -> Self {
        Self {
            store,
            provider,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            stats: Arc::new(Mutex::new(CacheStats::new())),
        }
    }

    /// Overrides the upper bound on a single provider call.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    // == Resolve Rate ==
    /// Returns the rate for `(base, target)`, fetching and caching it on a miss.
    ///
    /// `base == target` takes the normal path; no 1.0 shortcut is applied.
    pub async fn resolve_rate(
        &self,
        base: &str,
        target: &str,
        now: i64,
    ) -> Result<Resolution, ConversionError> {
        validate_code(base)?;
        validate_code(target)?;

        // Lock is released before the provider call
        let cached = self.store.lock().await.get(base, target)?;
        if let Some(record) = cached {
            self.stats.lock().await.record_hit();
            debug!("Used cached rate {} -> {}: {}", base, target, record.rate);
            return Ok(Resolution {
                rate: record.rate,
                source: RateSource::Cache,
                cache_warning: None,
            });
        }

        self.stats.lock().await.record_miss();

        // The fetch and write run to completion even if the caller stops waiting
        let miss = MissFetch {
            store: self.store.clone(),
            provider: self.provider.clone(),
            stats: self.stats.clone(),
            fetch_timeout: self.fetch_timeout,
            base: base.to_string(),
            target: target.to_string(),
            now,
        };
        let (rate, cache_warning) = tokio::spawn(miss.run()).await.map_err(|err| {
            ConversionError::ProviderUnavailable(format!("rate fetch task failed: {}", err))
        })??;

        Ok(Resolution {
            rate,
            source: RateSource::Provider,
            cache_warning,
        })
    }

    // == Convert ==
    /// Converts `amount` of base into target using the resolved rate.
    ///
    /// `amount` must be finite and non-zero.
    pub async fn convert(
        &self,
        base: &str,
        target: &str,
        amount: f64,
        now: i64,
    ) -> Result<Conversion, ConversionError> {
        if !amount.is_finite() || amount == 0.0 {
            return Err(ConversionError::Validation(format!(
                "amount must be a finite non-zero number, got {}",
                amount
            )));
        }

        let resolution = self.resolve_rate(base, target, now).await?;
        let conversion = Conversion::new(base, target, amount, resolution.rate, resolution.source);
        Ok(match resolution.cache_warning {
            Some(err) => conversion.with_cache_warning(err.to_string()),
            None => conversion,
        })
    }

    // == Stats ==
    /// Returns a snapshot of the lookup counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.lock().await.clone()
    }
}

// == Miss Fetch ==
/// Owned fetch-then-store job for one cache miss, run as its own task.
struct MissFetch {
    store: SharedStore,
    provider: Arc<dyn RateProvider>,
    stats: Arc<Mutex<CacheStats>>,
    fetch_timeout: Duration,
    base: String,
    target: String,
    now: i64,
}

impl MissFetch {
    async fn run(self) -> Result<(f64, Option<StoreError>), ConversionError> {
        let (base, target) = (self.base.as_str(), self.target.as_str());
        let rate = self.fetch().await?;

        let written = self.store.lock().await.upsert(base, target, rate, self.now);
        let cache_warning = match written {
            Ok(()) => {
                info!("Fetched rate {} -> {} from provider and stored: {}", base, target, rate);
                None
            }
            Err(err) => {
                self.stats.lock().await.record_store_failure();
                warn!("Fetched rate {} -> {} but caching it failed: {}", base, target, err);
                Some(err)
            }
        };
        Ok((rate, cache_warning))
    }

    async fn fetch(&self) -> Result<f64, ConversionError> {
        let outcome = tokio::time::timeout(
            self.fetch_timeout,
            self.provider.fetch_rate(&self.base, &self.target),
        )
        .await;

        let result = match outcome {
            Err(_) => Err(ConversionError::ProviderUnavailable(format!(
                "no answer within {:?}",
                self.fetch_timeout
            ))),
            Ok(Err(err)) => Err(ConversionError::ProviderUnavailable(err.to_string())),
            Ok(Ok(rate)) => validate_rate(rate).map_err(|_| ConversionError::InvalidRate(rate)),
        };

        let mut stats = self.stats.lock().await;
        match &result {
            Ok(_) => stats.record_fetch(),
            Err(err) => {
                stats.record_provider_failure();
                warn!("Rate fetch {} -> {} failed: {}", self.base, self.target, err);
            }
        }
        result
    }
}
