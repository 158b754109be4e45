//! Ratebook - A currency conversion client with a persistent rate cache
//!
//! Serves exchange rates from a local SQLite table, fetching and caching them
//! on a miss, and prunes old entries before the history is shown.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod providers;
pub mod store;
pub mod tasks;

pub use app::{App, Command};
pub use cache::RatePolicy;
pub use config::Config;
pub use history::{Confirmation, HistoryView};
pub use store::{RateStore, SharedStore};
pub use tasks::RetentionSweeper;
