//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite file holding the `conversions` table
    pub db_path: PathBuf,
    /// Base URL of the exchange rate pair endpoint
    pub rate_api_url: String,
    /// API key inserted into the rate endpoint path
    pub rate_api_key: String,
    /// URL of the currency code directory
    pub currency_codes_url: String,
    /// Age in seconds after which history entries are swept
    pub history_ttl: u64,
    /// Upper bound in seconds on a single remote rate fetch
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RATEBOOK_DB_PATH` - SQLite database file (default: conversions.db)
    /// - `RATE_API_URL` - Rate service base URL (default: https://v6.exchangerate-api.com/v6)
    /// - `RATE_API_KEY` - Rate service API key (default: empty)
    /// - `CURRENCY_CODES_URL` - Currency directory URL (default: openexchangerates currencies.json)
    /// - `HISTORY_TTL_SECS` - History retention in seconds (default: 172800, two days)
    /// - `FETCH_TIMEOUT_SECS` - Remote fetch timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env::var("RATEBOOK_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            rate_api_url: env::var("RATE_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.rate_api_url),
            rate_api_key: env::var("RATE_API_KEY").unwrap_or(defaults.rate_api_key),
            currency_codes_url: env::var("CURRENCY_CODES_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.currency_codes_url),
            history_ttl: env::var("HISTORY_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.history_ttl),
            fetch_timeout: positive_secs(
                env::var("FETCH_TIMEOUT_SECS").ok(),
                defaults.fetch_timeout,
            ),
        }
    }

    /// History retention expressed in milliseconds, the unit of `created_at`.
    pub fn history_ttl_ms(&self) -> i64 {
        i64::try_from(self.history_ttl.saturating_mul(1000)).unwrap_or(i64::MAX)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("conversions.db"),
            rate_api_url: "https://v6.exchangerate-api.com/v6".to_string(),
            rate_api_key: String::new(),
            currency_codes_url: "https://openexchangerates.org/api/currencies.json".to_string(),
            history_ttl: 2 * 24 * 60 * 60,
            fetch_timeout: 10,
        }
    }
}

/// Parses a seconds value, falling back to `default` when it is missing,
/// malformed or zero. A zero fetch timeout would fail every lookup.
fn positive_secs(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|v| v.parse().ok())
        .filter(|&secs: &u64| secs > 0)
        .unwrap_or(default)
}
