//! Subscription tiers and the static capability table.
//!
//! Polygon.io entitlements are flat per subscription level; the table
//! below is the single source of truth for what each tier may call.
//! Unknown tier names degrade to `Free` rather than failing, so a stale
//! or mistyped persisted setting can never brick the dashboard.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Capability tag gating one category of market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    EndOfDayPrices,
    TickerSearch,
    DelayedQuotes,
    RealtimeQuotes,
    OptionsChain,
    Greeks,
    ImpliedVolatility,
    HistoricalOptions,
}

impl Capability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndOfDayPrices => "endOfDayPrices",
            Self::TickerSearch => "tickerSearch",
            Self::DelayedQuotes => "delayedQuotes",
            Self::RealtimeQuotes => "realtimeQuotes",
            Self::OptionsChain => "optionsChain",
            Self::Greeks => "greeks",
            Self::ImpliedVolatility => "iv",
            Self::HistoricalOptions => "historicalOptions",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polygon.io subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Starter,
    Advanced,
    Business,
}

const FREE_CAPABILITIES: &[Capability] = &[Capability::EndOfDayPrices, Capability::TickerSearch];

const STARTER_CAPABILITIES: &[Capability] = &[
    Capability::EndOfDayPrices,
    Capability::TickerSearch,
    Capability::DelayedQuotes,
    Capability::OptionsChain,
    Capability::Greeks,
    Capability::ImpliedVolatility,
];

const ADVANCED_CAPABILITIES: &[Capability] = &[
    Capability::EndOfDayPrices,
    Capability::TickerSearch,
    Capability::RealtimeQuotes,
    Capability::OptionsChain,
    Capability::Greeks,
    Capability::ImpliedVolatility,
];

const BUSINESS_CAPABILITIES: &[Capability] = &[
    Capability::EndOfDayPrices,
    Capability::TickerSearch,
    Capability::RealtimeQuotes,
    Capability::OptionsChain,
    Capability::Greeks,
    Capability::ImpliedVolatility,
    Capability::HistoricalOptions,
];

impl Tier {
    pub const ALL: [Self; 4] = [Self::Free, Self::Starter, Self::Advanced, Self::Business];

    /// Total mapping from a persisted tier name; anything unrecognized
    /// falls back to the free tier.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "starter" => Self::Starter,
            "advanced" => Self::Advanced,
            "business" => Self::Business,
            _ => Self::Free,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Advanced => "advanced",
            Self::Business => "business",
        }
    }

    /// Capability tags enabled for this tier.
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Free => FREE_CAPABILITIES,
            Self::Starter => STARTER_CAPABILITIES,
            Self::Advanced => ADVANCED_CAPABILITIES,
            Self::Business => BUSINESS_CAPABILITIES,
        }
    }

    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
