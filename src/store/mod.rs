//! Store Module
//!
//! Persistent exchange-rate table keyed by ordered currency pair.

mod rate_store;
mod record;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::Mutex;

// Re-export public types
pub use rate_store::{validate_code, validate_rate, RateStore};
pub use record::{current_timestamp_ms, RateRecord};

/// Single serialized handle shared by the policy, sweeper and history view.
pub type SharedStore = Arc<Mutex<RateStore>>;

// == Public Constants ==
/// Maximum accepted currency code length in bytes
pub const MAX_CODE_LENGTH: usize = 16;

/// Wraps a store into the shared handle.
pub fn shared(store: RateStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}
