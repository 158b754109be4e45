//! Rate Record Module
//!
//! Defines the single persisted entity: one cached rate for an ordered pair.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Rate Record ==
/// A cached exchange rate as stored in the `conversions` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRecord {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// Base currency code, as supplied by the caller
    pub base: String,
    /// Target currency code, as supplied by the caller
    pub target: String,
    /// Units of target per one unit of base
    pub rate: f64,
    /// Write timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl RateRecord {
    // == Created At ==
    /// Returns the write timestamp as a UTC datetime.
    ///
    /// Returns `None` when the stored millisecond value is out of chrono's range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    // == Age ==
    /// Milliseconds elapsed between the write and `now`.
    ///
    /// Saturates instead of overflowing; a record written after `now` has a
    /// negative age.
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
