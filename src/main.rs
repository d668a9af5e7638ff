//! TriangularArbitrage - Main Entry Point
//!
//! Builds constraint bundles from order-book snapshots and resolves BitMEX
//! instrument metadata.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use triangular_arbitrage::config::{load_config, AppConfig};
use triangular_arbitrage::exchange::{BitmexRestClient, MetadataCache, MetadataProvider};
use triangular_arbitrage::{ConstraintSolver, Direction, TriangleBooks};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", env = "APP_CONFIG")]
    config: String,

    /// Log level or filter directives; `RUST_LOG` takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a constraint bundle from a JSON file of three snapshots
    Constraints {
        /// JSON file with `first`, `second` and `third` level lists
        #[arg(long)]
        books: String,

        /// Buy/sell combination, e.g. BSB
        #[arg(long)]
        direction: Direction,

        /// Fee/tolerance; defaults to `solver.fee` from the configuration
        #[arg(long)]
        fee: Option<Decimal>,
    },
    /// Resolve listing index, tick size and multipliers for a symbol
    Instrument {
        /// Exchange symbol, e.g. XBTUSD
        symbol: String,
    },
    /// Load and validate the configuration, then print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(args.log_level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Configuration file: {}", args.config);

    match args.command {
        Command::Constraints {
            books,
            direction,
            fee,
        } => {
            let fee = match fee {
                Some(fee) => fee,
                None => load(&args.config)?.solver.fee,
            };
            let raw = std::fs::read_to_string(&books)
                .with_context(|| format!("reading order books from {books}"))?;
            let books: TriangleBooks = serde_json::from_str(&raw).context("parsing order books")?;

            let bundle = ConstraintSolver::new().build(
                direction,
                &books.first,
                &books.second,
                &books.third,
                fee,
            )?;
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        Command::Instrument { symbol } => {
            let config = load(&args.config)?;
            let domain = config.exchange_domain()?;
            let client = BitmexRestClient::for_domain(
                domain,
                Duration::from_secs(config.settings.request_timeout_seconds),
            )?;
            let cache = Arc::new(MetadataCache::with_ttl_secs(config.metadata.cache_ttl_secs));
            let provider = MetadataProvider::new(client, cache, config.metadata.clone());

            let index = provider.trading_pair_index(&symbol).await?;
            let multipliers = provider.trading_pair_multipliers(&symbol).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "exchange": domain.name(),
                    "symbol": symbol,
                    "index": index.index,
                    "tick_size": index.tick_size,
                    "base_multiplier": multipliers.base_multiplier,
                    "quote_multiplier": multipliers.quote_multiplier,
                }))?
            );
        }
        Command::CheckConfig => {
            let config = load(&args.config)?;
            info!(
                exchange = %config.strategy.exchange,
                markets = %config.strategy.markets,
                "Configuration is valid"
            );
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn load(path: &str) -> Result<AppConfig> {
    load_config(Some(path)).with_context(|| format!("loading configuration from {path}"))
}
