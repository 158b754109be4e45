//! History View Module
//!
//! Read-only projection of the rate store for the conversion history screen,
//! plus the confirmed clear-all action.

use tracing::{info, warn};

use crate::error::Result;
use crate::store::{RateRecord, SharedStore};
use crate::tasks::RetentionSweeper;

/// Caller's answer to "delete all conversion history?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// History adapter over the shared store.
#[derive(Debug)]
pub struct HistoryView {
    store: SharedStore,
    sweeper: RetentionSweeper,
}

impl HistoryView {
    pub fn new(store: SharedStore, sweeper: RetentionSweeper) -> Self {
        Self { store, sweeper }
    }

    /// Hook for entering the history screen: sweep, then list.
    ///
    /// The sweep is best effort. A failure is logged and the listing still runs.
    pub async fn enter(&self, now: i64) -> Result<Vec<RateRecord>> {
        if let Err(err) = self.sweeper.sweep_expired(now).await {
            warn!("Error cleaning up old conversion data: {}", err);
        }
        self.list_history().await
    }

    /// Returns every cached rate, ordered by id.
    pub async fn list_history(&self) -> Result<Vec<RateRecord>> {
        self.store.lock().await.list_all()
    }

    /// Deletes all history when the caller confirmed.
    ///
    /// Returns whether anything was attempted; a declined confirmation leaves
    /// the store untouched.
    pub async fn clear_history(&self, confirmation: Confirmation) -> Result<bool> {
        if confirmation != Confirmation::Confirmed {
            return Ok(false);
        }
        let removed = self.store.lock().await.delete_all()?;
        info!("All conversion data deleted ({} records)", removed);
        Ok(true)
    }
}
