use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 12;

/// Normalized stock ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase.
    ///
    /// Accepts Polygon's equity grammar: a leading ASCII letter followed
    /// by letters, digits, or the `.`/`-` share-class separators
    /// (BRK.B, LGF-A).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (index, ch) in trimmed.chars().enumerate() {
            let ch = ch.to_ascii_uppercase();
            match ch {
                'A'..='Z' => {}
                '0'..='9' | '.' | '-' if index > 0 => {}
                _ if index == 0 => return Err(ValidationError::TickerInvalidStart { ch }),
                _ => return Err(ValidationError::TickerInvalidChar { ch, index }),
            }
            normalized.push(ch);
        }

        // Every accepted character is ASCII, so bytes count characters.
        if normalized.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len: normalized.len(),
                max: MAX_TICKER_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

/// Option contract side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl Display for ContractType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(ValidationError::InvalidContractType {
                value: other.to_owned(),
            }),
        }
    }
}

/// OCC-style option ticker in Polygon's `O:` form.
///
/// Grammar: `O:` + underlying + YYMMDD expiration + `C`/`P` + strike in
/// thousandths of a dollar padded to eight digits, e.g.
/// `O:SPY251219C00650000` is the SPY $650 call expiring 2025-12-19.
/// Parsing decomposes the ticker so callers get the underlying,
/// expiration, side, and strike as typed values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionTicker {
    raw: String,
    underlying: Ticker,
    expiration: Date,
    contract_type: ContractType,
    strike_millis: u32,
}

impl OptionTicker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim().to_ascii_uppercase();
        let body = raw
            .strip_prefix("O:")
            .ok_or(ValidationError::OptionTickerPrefix)?;

        // Shortest legal body: one-letter underlying + six-digit date +
        // side + eight-digit strike.
        if body.len() < 16 {
            return Err(malformed(&raw, "too short"));
        }

        let (rest, strike) = body.split_at(body.len() - 8);
        let (rest, side) = rest.split_at(rest.len() - 1);
        let (symbol, date) = rest.split_at(rest.len() - 6);

        let underlying = Ticker::parse(symbol)?;
        let expiration = parse_expiration(&raw, date)?;

        let contract_type = match side {
            "C" => ContractType::Call,
            "P" => ContractType::Put,
            _ => return Err(malformed(&raw, "side must be C or P")),
        };

        if !strike.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(&raw, "strike must be eight digits"));
        }
        let strike_millis: u32 = strike
            .parse()
            .map_err(|_| malformed(&raw, "strike must be eight digits"))?;

        Ok(Self {
            raw,
            underlying,
            expiration,
            contract_type,
            strike_millis,
        })
    }

    /// The full provider-form ticker, e.g. `O:SPY251219C00650000`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn underlying(&self) -> &Ticker {
        &self.underlying
    }

    pub fn expiration(&self) -> Date {
        self.expiration
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Strike price in dollars.
    pub fn strike_price(&self) -> f64 {
        f64::from(self.strike_millis) / 1000.0
    }
}

fn parse_expiration(raw: &str, date: &str) -> Result<Date, ValidationError> {
    if !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(raw, "expiration must be YYMMDD"));
    }

    let year: i32 = date[..2].parse().map_err(|_| malformed(raw, "expiration must be YYMMDD"))?;
    let month: u8 = date[2..4].parse().map_err(|_| malformed(raw, "expiration must be YYMMDD"))?;
    let day: u8 = date[4..6].parse().map_err(|_| malformed(raw, "expiration must be YYMMDD"))?;

    let month =
        time::Month::try_from(month).map_err(|_| malformed(raw, "expiration month out of range"))?;
    Date::from_calendar_date(2000 + year, month, day)
        .map_err(|_| malformed(raw, "expiration is not a calendar date"))
}

fn malformed(raw: &str, reason: &'static str) -> ValidationError {
    ValidationError::InvalidOptionTicker {
        value: raw.to_owned(),
        reason,
    }
}

impl Display for OptionTicker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for OptionTicker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for OptionTicker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OptionTicker> for String {
    fn from(value: OptionTicker) -> Self {
        value.raw
    }
}
