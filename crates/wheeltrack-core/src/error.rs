use thiserror::Error;

/// Validation and contract errors exposed by `wheeltrack-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("option ticker must start with 'O:'")]
    OptionTickerPrefix,
    #[error("option ticker '{value}' is malformed: {reason}")]
    InvalidOptionTicker { value: String, reason: &'static str },

    #[error("invalid contract type '{value}', expected call or put")]
    InvalidContractType { value: String },

    #[error("invalid timespan '{value}', expected one of day, week, month")]
    InvalidTimespan { value: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
}
