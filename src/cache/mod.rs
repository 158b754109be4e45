//! Cache Module
//!
//! Read-through rate cache: serve from the store, fetch and persist on a miss.

mod policy;
mod stats;


// Re-export public types
pub use policy::{RatePolicy, Resolution};
pub use stats::CacheStats;

use std::time::Duration;

// == Public Constants ==
/// Upper bound on a single provider call unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
