//! Ratebook - A currency conversion client with a persistent rate cache
//!
//! Reads one command per line from stdin and prints the reply on stdout.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratebook::app::HELP;
use ratebook::providers::{http_client, ExchangeRateApi, OpenExchangeRatesDirectory};
use ratebook::store::{current_timestamp_ms, shared};
use ratebook::{App, Command, Config, Confirmation, HistoryView, RatePolicy, RateStore, RetentionSweeper};

/// Main entry point for the Ratebook client.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Open the rate store and build the HTTP providers
/// 4. Read commands from stdin until `quit` or end of input
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ratebook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: db_path={}, history_ttl={}s, fetch_timeout={}s",
        config.db_path.display(),
        config.history_ttl,
        config.fetch_timeout
    );

    let store = shared(
        RateStore::open(&config.db_path)
            .with_context(|| format!("opening {}", config.db_path.display()))?,
    );
    let client = http_client(config.fetch_timeout()).context("building HTTP client")?;

    let provider = Arc::new(ExchangeRateApi::new(
        client.clone(),
        config.rate_api_url.clone(),
        config.rate_api_key.clone(),
    ));
    let directory = Arc::new(OpenExchangeRatesDirectory::new(
        client,
        config.currency_codes_url.clone(),
    ));

    let policy = RatePolicy::new(store.clone(), provider).with_fetch_timeout(config.fetch_timeout());
    let sweeper = RetentionSweeper::new(store.clone(), config.history_ttl_ms());
    let app = App::new(policy, HistoryView::new(store, sweeper), directory);

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let confirmation = if command == Command::Clear {
            print!("Are you sure you want to delete all conversion history? [y/N] ");
            std::io::stdout().flush()?;
            match lines.next_line().await? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => Confirmation::Confirmed,
                _ => Confirmation::Declined,
            }
        } else {
            Confirmation::Declined
        };

        let reply = app
            .execute(command, current_timestamp_ms(), confirmation)
            .await;
        println!("{}", reply);
    }

    info!("Ratebook shutdown complete");
    Ok(())
}
