//! CLI argument definitions for Wheeltrack.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI exposes every client operation so the data layer can be
//! exercised and scripted without the dashboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Current price with prev-close fallback |
//! | `prev` | Previous session's OHLCV |
//! | `bars` | Historical OHLCV bars |
//! | `search` | Search stock tickers |
//! | `details` | Company reference data |
//! | `chain` | Options chain snapshot |
//! | `contract` | Single option contract snapshot |
//! | `indices` | Benchmark index performance |
//! | `status` | Test the provider connection |
//! | `features` | Show the tier capability table |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Configuration
//!
//! The API key and subscription tier come from the environment:
//! `POLYGON_API_KEY` (default empty) and `POLYGON_TIER` (default `free`).
//!
//! # Examples
//!
//! ```bash
//! # Current price for one ticker
//! wheeltrack quote SPY
//!
//! # 30 daily bars, pretty-printed
//! wheeltrack bars SPY --timespan day --limit 30 --pretty
//!
//! # Puts expiring on a specific date
//! wheeltrack chain SPY --expiration 2026-09-18 --contract-type put
//! ```

use clap::{Args, Parser, Subcommand};

/// Wheeltrack - tiered Polygon.io data client for the wheel strategy
///
/// Fetches quotes, bars, ticker reference data, and options chains with
/// feature gating per subscription tier. Results print as JSON; missing
/// or gated data prints as empty JSON values.
#[derive(Debug, Parser)]
#[command(
    name = "wheeltrack",
    author,
    version,
    about = "Tiered Polygon.io market-data CLI"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current price for a ticker.
    ///
    /// Uses the real-time last trade when the tier is entitled to it and
    /// falls back to the previous session's close otherwise.
    ///
    /// # Examples
    ///
    ///   wheeltrack quote SPY
    ///   wheeltrack quote BRK.B --pretty
    Quote(TickerArgs),

    /// Fetch the previous session's OHLCV for a ticker.
    Prev(TickerArgs),

    /// Fetch historical OHLCV bars.
    ///
    /// # Examples
    ///
    ///   wheeltrack bars SPY
    ///   wheeltrack bars SPY --timespan week --limit 52
    ///   wheeltrack bars AAPL --from 2026-01-01 --to 2026-06-30
    Bars(BarsArgs),

    /// Search active stock tickers by symbol or company name.
    ///
    /// # Examples
    ///
    ///   wheeltrack search apple
    ///   wheeltrack search micro --limit 5
    Search(SearchArgs),

    /// Fetch company reference data for a ticker.
    Details(TickerArgs),

    /// Fetch the options chain snapshot for an underlying.
    ///
    /// # Examples
    ///
    ///   wheeltrack chain SPY
    ///   wheeltrack chain SPY --expiration 2026-09-18 --contract-type put
    Chain(ChainArgs),

    /// Fetch a single option contract snapshot by its option ticker.
    ///
    /// # Examples
    ///
    ///   wheeltrack contract O:SPY251219C00650000
    Contract(ContractArgs),

    /// Window performance of the benchmark indices.
    Indices(IndicesArgs),

    /// Test the provider connection with the configured API key.
    Status,

    /// Show the capability table for the configured tier.
    Features,
}

/// Arguments for commands taking a single stock ticker.
#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Stock ticker (e.g., SPY, AAPL, BRK.B).
    pub ticker: String,
}

/// Arguments for the `bars` command.
#[derive(Debug, Args)]
pub struct BarsArgs {
    /// Stock ticker to fetch bars for.
    pub ticker: String,

    /// Bar width: day, week, or month.
    #[arg(long, default_value = "day")]
    pub timespan: String,

    /// Range start date (YYYY-MM-DD). Defaults to `to` minus `limit` days.
    #[arg(long)]
    pub from: Option<String>,

    /// Range end date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub to: Option<String>,

    /// Maximum number of bars to return.
    #[arg(long, default_value_t = 120)]
    pub limit: usize,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search query (symbol or company name).
    pub query: String,

    /// Maximum number of results to return.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Arguments for the `chain` command.
#[derive(Debug, Args)]
pub struct ChainArgs {
    /// Underlying stock ticker.
    pub ticker: String,

    /// Filter by expiration date (YYYY-MM-DD).
    #[arg(long)]
    pub expiration: Option<String>,

    /// Filter by contract type: call or put.
    #[arg(long)]
    pub contract_type: Option<String>,
}

/// Arguments for the `contract` command.
#[derive(Debug, Args)]
pub struct ContractArgs {
    /// OCC-style option ticker (e.g., O:SPY251219C00650000).
    pub option_ticker: String,
}

/// Arguments for the `indices` command.
#[derive(Debug, Args)]
pub struct IndicesArgs {
    /// Lookback window in days.
    #[arg(long, default_value_t = wheeltrack_core::DEFAULT_INDEX_WINDOW_DAYS)]
    pub days: usize,
}
