//! Cache Statistics Module
//!
//! Tracks rate lookup outcomes: cache hits, misses, and what happened on a miss.

use serde::Serialize;

// == Cache Stats ==
/// Counters kept by the rate policy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the table
    pub hits: u64,
    /// Lookups that had to go to the provider
    pub misses: u64,
    /// Provider answers that were valid and returned to the caller
    pub fetches: u64,
    /// Provider calls that failed, timed out, or returned an invalid rate
    pub provider_failures: u64,
    /// Writes after a successful fetch that could not be persisted
    pub store_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Counts a lookup answered from the store.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Counts a lookup that found no stored rate.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Fetch ==
    /// Counts a provider call that returned a usable rate.
    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    // == Record Provider Failure ==
    /// Counts a provider call that failed, timed out or returned an invalid rate.
    pub fn record_provider_failure(&mut self) {
        self.provider_failures += 1;
    }

    // == Record Store Failure ==
    /// Counts a fetched rate that could not be written back.
    pub fn record_store_failure(&mut self) {
        self.store_failures += 1;
    }
}
