//! Line-command front end
//!
//! Stands in for the UI event handlers: each input line becomes a `Command`,
//! executed against the rate policy, the history view and the currency
//! directory, and rendered as a reply string.

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::cache::RatePolicy;
use crate::history::{Confirmation, HistoryView};
use crate::models::RateSource;
use crate::providers::CurrencyDirectory;
use crate::store::RateRecord;

/// Errors for input lines that do not form a command
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: '{0}'. Type 'help' for the list of commands")]
    Unknown(String),

    #[error("Usage: convert <BASE> <TARGET> [AMOUNT]")]
    ConvertUsage,

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
}

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Convert {
        base: String,
        target: String,
        amount: f64,
    },
    History,
    Clear,
    Currencies,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// Currency codes are passed through exactly as typed.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "convert" => {
                let args: Vec<&str> = parts.collect();
                let (base, target, amount) = match args.as_slice() {
                    [base, target] => (*base, *target, 1.0),
                    [base, target, amount] => (
                        *base,
                        *target,
                        amount
                            .parse::<f64>()
                            .map_err(|_| CommandError::InvalidAmount(amount.to_string()))?,
                    ),
                    _ => return Err(CommandError::ConvertUsage),
                };
                Command::Convert {
                    base: base.to_string(),
                    target: target.to_string(),
                    amount,
                }
            }
            "history" => Command::History,
            "clear" => Command::Clear,
            "currencies" => Command::Currencies,
            "stats" => Command::Stats,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  convert <BASE> <TARGET> [AMOUNT]   convert AMOUNT (default 1) of BASE into TARGET
  history                            show cached rates (older entries are swept first)
  clear                              delete all history after confirmation
  currencies                         list known currency codes
  stats                              show cache hit/miss counters
  quit                               leave";

/// Wires the core components behind the command set.
pub struct App {
    policy: RatePolicy,
    history: HistoryView,
    directory: Arc<dyn CurrencyDirectory>,
}

impl App {
    pub fn new(
        policy: RatePolicy,
        history: HistoryView,
        directory: Arc<dyn CurrencyDirectory>,
    ) -> Self {
        Self {
            policy,
            history,
            directory,
        }
    }

    /// Runs `command` at time `now` and renders the reply.
    ///
    /// `confirmation` is the caller's answer to the clear-all prompt and only
    /// matters for `Command::Clear`.
    pub async fn execute(&self, command: Command, now: i64, confirmation: Confirmation) -> String {
        match command {
            Command::Convert {
                base,
                target,
                amount,
            } => match self.policy.convert(&base, &target, amount, now).await {
                Ok(conversion) => {
                    let mut reply = format!(
                        "Conversion result: {} {} = {} {} (rate {}, {})",
                        conversion.amount,
                        conversion.base,
                        conversion.display_amount(),
                        conversion.target,
                        conversion.rate,
                        match conversion.source {
                            RateSource::Cache => "cached",
                            RateSource::Provider => "fetched",
                        }
                    );
                    if let Some(warning) = &conversion.cache_warning {
                        reply.push_str(&format!("\nNote: rate not cached: {}", warning));
                    }
                    reply
                }
                Err(err) => {
                    error!("Error during conversion: {}", err);
                    format!("Conversion failed: {}", err)
                }
            },
            Command::History => match self.history.enter(now).await {
                Ok(records) if records.is_empty() => "No history available".to_string(),
                Ok(records) => records
                    .iter()
                    .map(render_record)
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(err) => {
                    error!("Error fetching cached data: {}", err);
                    format!("Could not load history: {}", err)
                }
            },
            Command::Clear => match self.history.clear_history(confirmation).await {
                Ok(true) => "All conversion history deleted".to_string(),
                Ok(false) => "Nothing deleted".to_string(),
                Err(err) => {
                    error!("Error deleting all records: {}", err);
                    format!("Could not delete history: {}", err)
                }
            },
            Command::Currencies => match self.directory.fetch_currency_codes().await {
                Ok(codes) => codes
                    .iter()
                    .map(|(code, name)| format!("{}  {}", code, name))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(err) => {
                    error!("Error fetching currency codes: {}", err);
                    format!("Could not load currency codes: {}", err)
                }
            },
            Command::Stats => {
                let stats = self.policy.stats().await;
                format!(
                    "hits={} misses={} fetches={} provider_failures={} store_failures={} hit_rate={:.2}",
                    stats.hits,
                    stats.misses,
                    stats.fetches,
                    stats.provider_failures,
                    stats.store_failures,
                    stats.hit_rate()
                )
            }
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }
}

fn render_record(record: &RateRecord) -> String {
    let when = record
        .created_at_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| record.created_at.to_string());
    format!(
        "#{}  {} -> {}  {}  ({})",
        record.id, record.base, record.target, record.rate, when
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_with_amount() {
        let cmd = Command::parse("convert GBP JPY 2.5").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Convert {
                base: "GBP".to_string(),
                target: "JPY".to_string(),
                amount: 2.5
            }
        );
    }

    #[test]
    fn test_parse_convert_defaults_amount_to_one() {
        let cmd = Command::parse("  convert usd eur ").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Convert {
                base: "usd".to_string(),
                target: "eur".to_string(),
                amount: 1.0
            }
        );
    }

    #[test]
    fn test_parse_convert_usage_errors() {
        assert_eq!(Command::parse("convert USD"), Err(CommandError::ConvertUsage));
        assert_eq!(
            Command::parse("convert USD EUR ten"),
            Err(CommandError::InvalidAmount("ten".to_string()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("history").unwrap(), Some(Command::History));
        assert_eq!(Command::parse("CLEAR").unwrap(), Some(Command::Clear));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("rates"),
            Err(CommandError::Unknown("rates".to_string()))
        );
    }

    #[test]
    fn test_render_record() {
        let record = RateRecord {
            id: 7,
            base: "GBP".to_string(),
            target: "JPY".to_string(),
            rate: 190.5,
            created_at: 0,
        };
        assert_eq!(
            render_record(&record),
            "#7  GBP -> JPY  190.5  (1970-01-01 00:00)"
        );
    }
}
