//! Tier-aware Polygon.io client.
//!
//! Every endpoint method follows the same pipeline: entitlement gate →
//! cache lookup (cacheable categories only) → HTTP request → envelope
//! status check → normalize → cache store. The public surface degrades
//! every failure to an empty sentinel so the dashboard keeps rendering
//! with partial data; the [`Fetch`] twins preserve the cause for tests
//! and diagnostics.
//!
//! # Endpoints
//!
//! | Method | Path | Gate | Cache TTL |
//! |--------|------|------|-----------|
//! | `ticker_details` | `/v3/reference/tickers/{T}` | none | 24 h |
//! | `search_tickers` | `/v3/reference/tickers` | tickerSearch | none |
//! | `previous_close` | `/v2/aggs/ticker/{T}/prev` | endOfDayPrices | 1 h |
//! | `current_price` | `/v2/last/trade/{T}` + fallback | realtimeQuotes (first leg) | none |
//! | `aggregate_bars` | `/v2/aggs/ticker/{T}/range/…` | endOfDayPrices | none |
//! | `options_chain` | `/v3/snapshot/options/{T}` | optionsChain | none |
//! | `option_contract` | `/v3/snapshot/options/{OT}` | optionsChain | none |

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::domain::{
    AggBar, ContractType, IndexPerformance, OptionContract, OptionGreeks, OptionTicker, PrevClose,
    TickerDetails, TickerMatch, Timespan,
};
use crate::http::{HttpClient, HttpRequest};
use crate::tier::Capability;
use crate::Ticker;

const POLYGON_BASE_URL: &str = "https://api.polygon.io";
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Ticker metadata barely moves; cache it for a day.
const TICKER_DETAILS_TTL: Duration = Duration::from_secs(86_400);
/// Previous close changes once per session; an hour keeps refreshes cheap.
const PREV_CLOSE_TTL: Duration = Duration::from_secs(3_600);

/// Benchmark indices shown on the dashboard's market-comparison card.
const INDEX_BENCHMARKS: [(&str, &str); 4] = [
    ("SPY", "S&P 500"),
    ("QQQ", "Nasdaq"),
    ("IWM", "Russell 2000"),
    ("DIA", "Dow Jones"),
];

/// Default lookback for [`PolygonClient::index_performance`].
pub const DEFAULT_INDEX_WINDOW_DAYS: usize = 365;

/// Internal outcome of one endpoint fetch.
///
/// The public methods collapse everything but `Success` into an empty
/// sentinel; this type is what keeps the causes distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Success(T),
    /// The tier's feature set does not include the required capability.
    /// No network call was attempted.
    Gated,
    /// The provider answered successfully but had nothing to return.
    NoData,
    /// Missing API key, timeout, connect failure, non-2xx status, or a
    /// body that was not the expected JSON envelope.
    Transport(String),
    /// Well-formed envelope reporting a non-success status or an
    /// explicit error message.
    Provider(String),
}

impl<T> Fetch<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn is_gated(&self) -> bool {
        matches!(self, Self::Gated)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetch<U> {
        match self {
            Self::Success(value) => Fetch::Success(f(value)),
            other => other.retag(),
        }
    }

    /// Carry a non-success outcome across a payload type boundary.
    /// `Success` has no sensible mapping here and becomes `NoData`.
    fn retag<U>(self) -> Fetch<U> {
        match self {
            Self::Success(_) | Self::NoData => Fetch::NoData,
            Self::Gated => Fetch::Gated,
            Self::Transport(message) => Fetch::Transport(message),
            Self::Provider(message) => Fetch::Provider(message),
        }
    }
}

/// Result of the settings page's connection probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub ok: bool,
    pub message: String,
}

/// Provider JSON envelope shared by every REST endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<String>,
    results: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

/// Aggregate row with the provider's single-letter field names.
#[derive(Debug, Deserialize)]
struct RawAgg {
    #[serde(rename = "o")]
    open: f64,
    #[serde(rename = "h")]
    high: f64,
    #[serde(rename = "l")]
    low: f64,
    #[serde(rename = "c")]
    close: f64,
    #[serde(rename = "v")]
    volume: Option<f64>,
    #[serde(rename = "vw")]
    vwap: Option<f64>,
    #[serde(rename = "t")]
    timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawLastTrade {
    #[serde(rename = "p")]
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOptionSnapshot {
    details: Option<RawOptionDetails>,
    greeks: Option<OptionGreeks>,
    implied_volatility: Option<f64>,
    open_interest: Option<f64>,
    break_even_price: Option<f64>,
    day: Option<RawOptionDay>,
    underlying_asset: Option<RawUnderlyingAsset>,
}

#[derive(Debug, Deserialize)]
struct RawOptionDetails {
    ticker: Option<String>,
    contract_type: Option<String>,
    strike_price: Option<f64>,
    expiration_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOptionDay {
    close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawUnderlyingAsset {
    ticker: Option<String>,
}

/// Tiered market-data client. One instance per configuration; the cache
/// lives and dies with the instance.
pub struct PolygonClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    cache: ResponseCache,
}

impl PolygonClient {
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http,
            cache: ResponseCache::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read-only view of this instance's cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.config.tier.has(capability)
    }

    // ---- request layer -------------------------------------------------

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{POLYGON_BASE_URL}{path}?");
        for (name, value) in params {
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("apiKey=");
        url.push_str(&urlencoding::encode(&self.config.api_key));
        url
    }

    /// Issue one GET and decode the provider envelope.
    ///
    /// Never returns an error to the caller; every failure mode folds
    /// into a [`Fetch`] variant and gets logged here, once.
    async fn request<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Fetch<T> {
        if self.config.api_key.is_empty() {
            tracing::debug!(path, "skipping request: no API key configured");
            return Fetch::Transport(String::from("no API key configured"));
        }

        let url = self.build_url(path, params);
        let request = HttpRequest::get(url).with_timeout_ms(REQUEST_TIMEOUT_MS);

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(path, error = %error, "polygon transport error");
                return Fetch::Transport(error.message().to_owned());
            }
        };

        if !response.is_success() {
            tracing::warn!(path, status = response.status, "polygon non-success status");
            return Fetch::Transport(format!("status {}", response.status));
        }

        let envelope: Envelope<T> = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(path, error = %error, "malformed polygon response");
                return Fetch::Transport(format!("malformed response: {error}"));
            }
        };

        if let Some(error) = envelope.error {
            tracing::debug!(path, error = %error, "polygon reported an error");
            return Fetch::Provider(error);
        }

        match envelope.status.as_deref() {
            Some("OK") => match envelope.results {
                Some(results) => Fetch::Success(results),
                None => Fetch::NoData,
            },
            other => {
                let status = other.unwrap_or("<missing>");
                let detail = envelope.message.unwrap_or_default();
                tracing::debug!(path, status, "polygon non-success envelope");
                if detail.is_empty() {
                    Fetch::Provider(format!("provider returned status '{status}'"))
                } else {
                    Fetch::Provider(detail)
                }
            }
        }
    }

    // ---- connection probe ----------------------------------------------

    /// Probe used by the settings page: pass/fail plus a message the
    /// user can read. Provider error messages surface verbatim.
    pub async fn test_connection(&self) -> ConnectionStatus {
        if self.config.api_key.is_empty() {
            return ConnectionStatus {
                ok: false,
                message: String::from("No API key configured"),
            };
        }

        match self
            .request::<Vec<TickerMatch>>("/v3/reference/tickers", &[("limit", "1")])
            .await
        {
            Fetch::Success(_) | Fetch::NoData => ConnectionStatus {
                ok: true,
                message: String::from("Connected successfully"),
            },
            Fetch::Provider(message) => ConnectionStatus { ok: false, message },
            Fetch::Gated | Fetch::Transport(_) => ConnectionStatus {
                ok: false,
                message: String::from("Connection failed"),
            },
        }
    }

    // ---- stock data ----------------------------------------------------

    /// Company reference data. Not entitlement-gated; cached for a day.
    pub async fn ticker_details(&self, ticker: &Ticker) -> Option<TickerDetails> {
        self.fetch_ticker_details(ticker).await.into_option()
    }

    pub async fn fetch_ticker_details(&self, ticker: &Ticker) -> Fetch<TickerDetails> {
        let cache_key = format!("ticker_details_{ticker}");
        if let Some(hit) = self.cache.get_record::<TickerDetails>(&cache_key).await {
            tracing::debug!(%ticker, "ticker details cache hit");
            return Fetch::Success(hit);
        }

        let path = format!("/v3/reference/tickers/{ticker}");
        match self.request::<TickerDetails>(&path, &[]).await {
            Fetch::Success(details) => {
                self.cache
                    .put_record(cache_key, &details, TICKER_DETAILS_TTL)
                    .await;
                Fetch::Success(details)
            }
            other => other.retag(),
        }
    }

    /// Search active stock tickers. Always live, never cached.
    pub async fn search_tickers(&self, query: &str, limit: usize) -> Vec<TickerMatch> {
        self.fetch_search_tickers(query, limit)
            .await
            .into_option()
            .unwrap_or_default()
    }

    pub async fn fetch_search_tickers(&self, query: &str, limit: usize) -> Fetch<Vec<TickerMatch>> {
        if !self.has_capability(Capability::TickerSearch) {
            tracing::debug!(tier = %self.config.tier, "ticker search gated");
            return Fetch::Gated;
        }

        let limit = limit.to_string();
        self.request(
            "/v3/reference/tickers",
            &[
                ("search", query),
                ("active", "true"),
                ("limit", &limit),
                ("market", "stocks"),
            ],
        )
        .await
    }

    /// Previous session's OHLCV for a ticker. Cached for an hour.
    pub async fn previous_close(&self, ticker: &Ticker) -> Option<PrevClose> {
        self.fetch_previous_close(ticker).await.into_option()
    }

    pub async fn fetch_previous_close(&self, ticker: &Ticker) -> Fetch<PrevClose> {
        if !self.has_capability(Capability::EndOfDayPrices) {
            tracing::debug!(tier = %self.config.tier, "previous close gated");
            return Fetch::Gated;
        }

        let cache_key = format!("prev_close_{ticker}");
        if let Some(hit) = self.cache.get_record::<PrevClose>(&cache_key).await {
            tracing::debug!(%ticker, "previous close cache hit");
            return Fetch::Success(hit);
        }

        let path = format!("/v2/aggs/ticker/{ticker}/prev");
        match self.request::<Vec<RawAgg>>(&path, &[]).await {
            Fetch::Success(rows) => match rows.into_iter().next() {
                Some(raw) => match normalize_prev_close(ticker.clone(), raw) {
                    Some(record) => {
                        self.cache
                            .put_record(cache_key, &record, PREV_CLOSE_TTL)
                            .await;
                        Fetch::Success(record)
                    }
                    None => Fetch::NoData,
                },
                None => Fetch::NoData,
            },
            other => other.retag(),
        }
    }

    /// Latest price with a two-tier fallback: real-time last trade when
    /// the tier is entitled to it, otherwise (or on any miss) the
    /// previous session's close. Not a retry; the legs hit different
    /// endpoints.
    pub async fn current_price(&self, ticker: &Ticker) -> Option<f64> {
        if self.has_capability(Capability::RealtimeQuotes) {
            if let Fetch::Success(price) = self.fetch_last_trade(ticker).await {
                return Some(price);
            }
        }

        self.previous_close(ticker).await.map(|prev| prev.close)
    }

    pub async fn fetch_last_trade(&self, ticker: &Ticker) -> Fetch<f64> {
        if !self.has_capability(Capability::RealtimeQuotes) {
            return Fetch::Gated;
        }

        let path = format!("/v2/last/trade/{ticker}");
        match self.request::<RawLastTrade>(&path, &[]).await {
            Fetch::Success(trade) => match trade.price {
                Some(price) => Fetch::Success(price),
                None => Fetch::NoData,
            },
            other => other.retag(),
        }
    }

    /// OHLCV bars over a date range. Defaults: `to` = today, `from` =
    /// today minus `limit` days. Always live, never cached.
    pub async fn aggregate_bars(
        &self,
        ticker: &Ticker,
        timespan: Timespan,
        from: Option<Date>,
        to: Option<Date>,
        limit: usize,
    ) -> Vec<AggBar> {
        self.fetch_aggregate_bars(ticker, timespan, from, to, limit)
            .await
            .into_option()
            .unwrap_or_default()
    }

    pub async fn fetch_aggregate_bars(
        &self,
        ticker: &Ticker,
        timespan: Timespan,
        from: Option<Date>,
        to: Option<Date>,
        limit: usize,
    ) -> Fetch<Vec<AggBar>> {
        if !self.has_capability(Capability::EndOfDayPrices) {
            tracing::debug!(tier = %self.config.tier, "aggregate bars gated");
            return Fetch::Gated;
        }

        let today = OffsetDateTime::now_utc().date();
        let to = to.unwrap_or(today);
        let from = from.unwrap_or_else(|| {
            today
                .checked_sub(time::Duration::days(limit as i64))
                .unwrap_or(today)
        });

        let path = format!(
            "/v2/aggs/ticker/{ticker}/range/1/{timespan}/{}/{}",
            format_date(from),
            format_date(to),
        );
        let limit = limit.to_string();

        match self
            .request::<Vec<RawAgg>>(&path, &[("limit", &limit), ("sort", "asc")])
            .await
        {
            Fetch::Success(rows) => Fetch::Success(
                rows.into_iter()
                    .filter_map(|raw| {
                        AggBar::new(
                            raw.open,
                            raw.high,
                            raw.low,
                            raw.close,
                            raw.volume,
                            raw.vwap,
                            raw.timestamp,
                        )
                        .ok()
                    })
                    .collect(),
            ),
            other => other.retag(),
        }
    }

    // ---- options data (paid tiers) -------------------------------------

    /// Options chain snapshot for an underlying.
    pub async fn options_chain(
        &self,
        ticker: &Ticker,
        expiration_date: Option<&str>,
        contract_type: Option<ContractType>,
    ) -> Vec<OptionContract> {
        self.fetch_options_chain(ticker, expiration_date, contract_type)
            .await
            .into_option()
            .unwrap_or_default()
    }

    pub async fn fetch_options_chain(
        &self,
        ticker: &Ticker,
        expiration_date: Option<&str>,
        contract_type: Option<ContractType>,
    ) -> Fetch<Vec<OptionContract>> {
        if !self.has_capability(Capability::OptionsChain) {
            tracing::debug!(tier = %self.config.tier, "options chain gated");
            return Fetch::Gated;
        }

        let mut params = Vec::new();
        if let Some(expiration_date) = expiration_date {
            params.push(("expiration_date", expiration_date));
        }
        if let Some(contract_type) = contract_type {
            params.push(("contract_type", contract_type.as_str()));
        }

        let path = format!("/v3/snapshot/options/{ticker}");
        match self.request::<Vec<RawOptionSnapshot>>(&path, &params).await {
            Fetch::Success(rows) => Fetch::Success(
                rows.into_iter()
                    .filter_map(normalize_option_contract)
                    .collect(),
            ),
            other => other.retag(),
        }
    }

    /// Snapshot for one specific contract, addressed by its parsed
    /// OCC-style option ticker.
    pub async fn option_contract(&self, options_ticker: &OptionTicker) -> Option<OptionContract> {
        self.fetch_option_contract(options_ticker)
            .await
            .into_option()
    }

    pub async fn fetch_option_contract(
        &self,
        options_ticker: &OptionTicker,
    ) -> Fetch<OptionContract> {
        if !self.has_capability(Capability::OptionsChain) {
            tracing::debug!(tier = %self.config.tier, "option contract gated");
            return Fetch::Gated;
        }

        let path = format!("/v3/snapshot/options/{options_ticker}");
        match self.request::<Vec<RawOptionSnapshot>>(&path, &[]).await {
            Fetch::Success(rows) => match rows.into_iter().find_map(normalize_option_contract) {
                Some(contract) => Fetch::Success(contract),
                None => Fetch::NoData,
            },
            other => other.retag(),
        }
    }

    // ---- market indices ------------------------------------------------

    /// Window return for the four benchmark indices, keyed by display
    /// name. Symbols with fewer than two bars or a zero starting close
    /// are omitted rather than reported as errors; that precondition is
    /// what keeps the division safe.
    pub async fn index_performance(&self, days: usize) -> BTreeMap<String, IndexPerformance> {
        let mut performance = BTreeMap::new();

        for (symbol, name) in INDEX_BENCHMARKS {
            let ticker = Ticker::parse(symbol).expect("benchmark symbols are valid");
            let bars = self
                .aggregate_bars(&ticker, Timespan::Day, None, None, days)
                .await;

            if bars.len() < 2 {
                continue;
            }

            let start = bars[0].close;
            let end = bars[bars.len() - 1].close;
            if start <= 0.0 {
                continue;
            }

            let return_pct = round_to_cents((end - start) / start * 100.0);
            performance.insert(
                name.to_owned(),
                IndexPerformance {
                    ticker: symbol.to_owned(),
                    return_pct,
                    current_price: end,
                },
            );
        }

        performance
    }
}

fn normalize_prev_close(ticker: Ticker, raw: RawAgg) -> Option<PrevClose> {
    PrevClose::new(
        ticker,
        raw.close,
        raw.open,
        raw.high,
        raw.low,
        raw.volume,
        raw.vwap,
        raw.timestamp,
    )
    .ok()
}

fn normalize_option_contract(raw: RawOptionSnapshot) -> Option<OptionContract> {
    let details = raw.details?;
    let ticker = details.ticker?;

    Some(OptionContract {
        ticker,
        underlying: raw.underlying_asset.and_then(|asset| asset.ticker),
        contract_type: details.contract_type,
        strike_price: details.strike_price,
        expiration_date: details.expiration_date,
        implied_volatility: raw.implied_volatility,
        open_interest: raw.open_interest,
        day_close: raw.day.and_then(|day| day.close),
        break_even_price: raw.break_even_price,
        greeks: raw.greeks,
    })
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    #[test]
    fn builds_url_with_encoded_params_and_api_key() {
        let client = PolygonClient::new(
            ClientConfig::new("key 123", Tier::Free),
            Arc::new(crate::http::NoopHttpClient),
        );

        let url = client.build_url("/v3/reference/tickers", &[("search", "brk b")]);
        assert_eq!(
            url,
            "https://api.polygon.io/v3/reference/tickers?search=brk%20b&apiKey=key%20123"
        );
    }

    #[test]
    fn rounds_return_percentages_to_two_decimals() {
        assert_eq!(round_to_cents(5.005), 5.01);
        assert_eq!(round_to_cents(-0.3333), -0.33);
    }

    #[test]
    fn formats_range_dates() {
        let date = Date::from_calendar_date(2026, time::Month::March, 7).expect("valid date");
        assert_eq!(format_date(date), "2026-03-07");
    }

    #[test]
    fn normalizes_option_snapshot_fields() {
        let raw: RawOptionSnapshot = serde_json::from_str(
            r#"{
                "details": {
                    "ticker": "O:SPY251219C00650000",
                    "contract_type": "call",
                    "strike_price": 650.0,
                    "expiration_date": "2025-12-19"
                },
                "greeks": {"delta": 0.42, "gamma": 0.01, "theta": -0.05, "vega": 0.11},
                "implied_volatility": 0.19,
                "open_interest": 1234.0,
                "day": {"close": 12.5},
                "underlying_asset": {"ticker": "SPY"}
            }"#,
        )
        .expect("snapshot should parse");

        let contract = normalize_option_contract(raw).expect("contract expected");
        assert_eq!(contract.ticker, "O:SPY251219C00650000");
        assert_eq!(contract.underlying.as_deref(), Some("SPY"));
        assert_eq!(contract.strike_price, Some(650.0));
        assert_eq!(contract.day_close, Some(12.5));
        assert_eq!(contract.greeks.expect("greeks").delta, Some(0.42));
    }

    #[test]
    fn snapshot_without_details_is_skipped() {
        let raw: RawOptionSnapshot =
            serde_json::from_str(r#"{"implied_volatility": 0.2}"#).expect("should parse");
        assert!(normalize_option_contract(raw).is_none());
    }
}
