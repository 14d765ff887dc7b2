use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Ticker, ValidationError};

/// Aggregate bucket width for bar queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timespan {
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
}

impl Timespan {
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl Display for Timespan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(ValidationError::InvalidTimespan {
                value: other.to_owned(),
            }),
        }
    }
}

/// Previous-session close record, normalized from the provider's
/// single-letter aggregate fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevClose {
    pub ticker: Ticker,
    pub close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: Option<f64>,
    pub vwap: Option<f64>,
    /// Provider bar timestamp in milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,
}

impl PrevClose {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ticker: Ticker,
        close: f64,
        open: f64,
        high: f64,
        low: f64,
        volume: Option<f64>,
        vwap: Option<f64>,
        timestamp: Option<i64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("close", close)?;
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_optional_non_negative("vwap", vwap)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            ticker,
            close,
            open,
            high,
            low,
            volume,
            vwap,
            timestamp,
        })
    }
}

/// OHLCV bar from the aggregates range endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
    pub vwap: Option<f64>,
    pub timestamp: Option<i64>,
}

impl AggBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
        vwap: Option<f64>,
        timestamp: Option<i64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_optional_non_negative("vwap", vwap)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
            vwap,
            timestamp,
        })
    }
}

/// Company reference record from the ticker details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerDetails {
    pub ticker: String,
    pub name: String,
    pub market: Option<String>,
    pub primary_exchange: Option<String>,
    pub currency_name: Option<String>,
    pub market_cap: Option<f64>,
    pub description: Option<String>,
}

/// Single row of a ticker search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMatch {
    pub ticker: String,
    pub name: String,
    pub market: Option<String>,
    pub primary_exchange: Option<String>,
    pub active: Option<bool>,
}

/// Provider-supplied option greeks, forwarded verbatim.
///
/// Never computed locally; absent whenever the provider omits them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionGreeks {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
}

/// One contract from the options snapshot endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC-style option ticker, e.g. `O:SPY251219C00650000`.
    pub ticker: String,
    pub underlying: Option<String>,
    pub contract_type: Option<String>,
    pub strike_price: Option<f64>,
    pub expiration_date: Option<String>,
    pub implied_volatility: Option<f64>,
    pub open_interest: Option<f64>,
    pub day_close: Option<f64>,
    pub break_even_price: Option<f64>,
    pub greeks: Option<OptionGreeks>,
}

/// Percentage return of one benchmark index over a lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPerformance {
    pub ticker: String,
    /// Window return in percent, rounded to two decimals.
    pub return_pct: f64,
    pub current_price: f64,
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timespan() {
        let ts = Timespan::from_str("day").expect("must parse");
        assert_eq!(ts, Timespan::Day);
    }

    #[test]
    fn rejects_invalid_timespan() {
        let err = Timespan::from_str("hour").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimespan { .. }));
    }

    #[test]
    fn rejects_inverted_bar_range() {
        let err = AggBar::new(10.0, 9.0, 11.0, 10.5, None, None, None).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_negative_close() {
        let ticker = Ticker::parse("SPY").expect("valid");
        let err = PrevClose::new(ticker, -1.0, 1.0, 2.0, 0.5, None, None, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "close" }));
    }
}
