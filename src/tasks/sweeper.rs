//! Retention Sweeper
//!
//! Prunes cached rates whose age exceeds the history TTL.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::error::Result;
use crate::store::SharedStore;

/// Two days in milliseconds.
pub const DEFAULT_HISTORY_TTL_MS: i64 = 2 * 24 * 60 * 60 * 1000;

/// Deletes every record older than a TTL in one pass.
///
/// Overlapping calls on the same sweeper do not both hit the store: the
/// second one returns `Ok(0)` immediately.
#[derive(Debug)]
pub struct RetentionSweeper {
    store: SharedStore,
    ttl_ms: i64,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the sweep ends, including on error.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RetentionSweeper {
    /// Creates a sweeper over the shared store with the given default TTL.
    pub fn new(store: SharedStore, ttl_ms: i64) -> Self {
        Self {
            store,
            ttl_ms,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Sweeps with the configured TTL.
    pub async fn sweep_expired(&self, now: i64) -> Result<usize> {
        self.sweep(now, self.ttl_ms).await
    }

    /// Removes every record with `created_at < now - ttl_ms`.
    ///
    /// Returns the number of records removed.
    pub async fn sweep(&self, now: i64, ttl_ms: i64) -> Result<usize> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            debug!("Retention sweep already running, skipping");
            return Ok(0);
        }
        let _guard = InFlight(&self.in_flight);

        let cutoff = now.saturating_sub(ttl_ms);
        let removed = self.store.lock().await.delete_older_than(cutoff)?;

        if removed > 0 {
            info!("Retention sweep: removed {} cached rates", removed);
        } else {
            debug!("Retention sweep: nothing older than {}", cutoff);
        }
        Ok(removed)
    }
}
