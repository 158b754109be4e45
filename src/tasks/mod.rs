//! Maintenance Tasks Module
//!
//! Housekeeping that runs around user actions rather than on their data path.
//!
//! # Tasks
//! - Retention sweep: removes cached rates older than the history TTL

mod sweeper;

pub use sweeper::{RetentionSweeper, DEFAULT_HISTORY_TTL_MS};
