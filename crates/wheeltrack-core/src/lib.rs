//! # Wheeltrack Core
//!
//! Tiered Polygon.io market-data client for a wheel-strategy options
//! dashboard.
//!
//! ## Overview
//!
//! This crate provides the data layer for the dashboard:
//!
//! - **Subscription tiers** with a static capability table
//! - **Feature-gated endpoint methods** that degrade to empty values
//! - **Per-client TTL cache** for slow-moving reference data
//! - **HTTP transport seam** for production and offline test clients
//! - **Settings collaborator + client handle** for reconfiguration
//! - **Wheel aggregations** for premium summaries and charts
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | TTL response cache |
//! | [`client`] | Tier-aware Polygon client |
//! | [`config`] | Client configuration, settings store, client handle |
//! | [`domain`] | Domain models (Ticker, PrevClose, OptionContract, …) |
//! | [`error`] | Core error types |
//! | [`http`] | HTTP client abstraction |
//! | [`tier`] | Subscription tiers and capabilities |
//! | [`wheel`] | Premium aggregations over trades and positions |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wheeltrack_core::{ClientConfig, PolygonClient, ReqwestHttpClient, Ticker, Tier};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClientConfig::new("pk_live_...", Tier::Starter);
//!     let client = PolygonClient::new(config, Arc::new(ReqwestHttpClient::new()));
//!
//!     let ticker = Ticker::parse("SPY").unwrap();
//!     if let Some(price) = client.current_price(&ticker).await {
//!         println!("SPY: ${price:.2}");
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Endpoint methods never return errors: every failure degrades to an
//! empty value (`None`, empty `Vec`, empty map) so the dashboard keeps
//! rendering with partial data. The `fetch_*` twins return [`Fetch`],
//! which distinguishes gate denials, empty results, transport failures,
//! and provider errors for tests and diagnostics. Constructors of
//! validated domain types return [`ValidationError`].
//!
//! ## Security
//!
//! - The API key is only ever appended to outgoing request URLs; the
//!   `Debug` impl for [`ClientConfig`] redacts it.

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod tier;
pub mod wheel;

// Re-export commonly used types at crate root for convenience

// Client
pub use client::{ConnectionStatus, Fetch, PolygonClient, DEFAULT_INDEX_WINDOW_DAYS};

// Caching
pub use cache::ResponseCache;

// Configuration
pub use config::{
    ClientConfig, ClientHandle, MemorySettingsStore, SettingsStore, API_KEY_SETTING, TIER_SETTING,
};

// Domain models
pub use domain::{
    AggBar, ContractType, IndexPerformance, OptionContract, OptionGreeks, OptionTicker, PrevClose,
    Ticker, TickerDetails, TickerMatch, Timespan,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, RecordingHttpClient,
    ReqwestHttpClient,
};

// Tiers
pub use tier::{Capability, Tier};

// Wheel aggregations
pub use wheel::{
    portfolio_series, position_totals, premium_summary, top_performers, OptionSide,
    PortfolioPoint, Position, PositionTotals, PremiumSummary, TickerPremium, Trade,
};
