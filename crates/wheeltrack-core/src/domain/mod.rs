//! Canonical domain types for the wheel-strategy dashboard.

mod models;
mod ticker;

pub use models::{
    AggBar, IndexPerformance, OptionContract, OptionGreeks, PrevClose, TickerDetails, TickerMatch,
    Timespan,
};
pub use ticker::{ContractType, OptionTicker, Ticker};
