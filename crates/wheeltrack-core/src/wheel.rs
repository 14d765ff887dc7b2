//! Wheel-strategy premium aggregations.
//!
//! Pure functions over in-memory trade and position lists; the caller
//! owns persistence and passes the lists in. These feed the dashboard's
//! premium card, positions-table footer, top-performers list, and the
//! portfolio chart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Ticker;

/// Which leg of the wheel a premium came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSide {
    CoveredCall,
    CashSecuredPut,
}

/// One closed premium-collecting trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: Ticker,
    pub side: OptionSide,
    /// Net premium collected, in account currency.
    pub premium: f64,
    pub executed_at: Date,
}

/// Open position with its collected premium split by leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: Ticker,
    pub cc_premium: f64,
    pub csp_premium: f64,
}

impl Position {
    pub fn total_premium(&self) -> f64 {
        self.cc_premium + self.csp_premium
    }
}

/// Footer row of the positions table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PositionTotals {
    pub cc_premium: f64,
    pub csp_premium: f64,
    pub total_premium: f64,
}

/// Premium collected over the dashboard's standard windows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PremiumSummary {
    /// Trailing seven days, `as_of` inclusive.
    pub week: f64,
    /// Calendar month containing `as_of`.
    pub month: f64,
    /// Calendar year containing `as_of`.
    pub ytd: f64,
    pub all_time: f64,
}

/// One ticker's rank entry in the top-performers list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerPremium {
    pub ticker: Ticker,
    pub premium: f64,
}

/// One point of the cumulative-premium portfolio chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioPoint {
    pub date: Date,
    pub cumulative_premium: f64,
}

/// Sum the positions-table footer.
pub fn position_totals(positions: &[Position]) -> PositionTotals {
    let mut totals = PositionTotals::default();
    for position in positions {
        totals.cc_premium += position.cc_premium;
        totals.csp_premium += position.csp_premium;
    }
    totals.total_premium = totals.cc_premium + totals.csp_premium;
    totals
}

/// Premium sums for the standard dashboard windows, anchored at `as_of`.
///
/// Trades dated after `as_of` are ignored everywhere, including the
/// all-time sum, so a stale trade list and a future anchor cannot
/// disagree about "now".
pub fn premium_summary(trades: &[Trade], as_of: Date) -> PremiumSummary {
    let week_start = as_of
        .checked_sub(time::Duration::days(6))
        .unwrap_or(as_of);

    let mut summary = PremiumSummary::default();
    for trade in trades {
        let date = trade.executed_at;
        if date > as_of {
            continue;
        }
        summary.all_time += trade.premium;
        if date >= week_start {
            summary.week += trade.premium;
        }
        if date.year() == as_of.year() {
            summary.ytd += trade.premium;
            if date.month() == as_of.month() {
                summary.month += trade.premium;
            }
        }
    }
    summary
}

/// Tickers ranked by premium collected in the trailing `window_days`
/// ending at `as_of`, descending, at most `n` entries. Ties break by
/// ticker so the ordering is stable.
pub fn top_performers(trades: &[Trade], window_days: u32, n: usize, as_of: Date) -> Vec<TickerPremium> {
    let window_start = as_of
        .checked_sub(time::Duration::days(i64::from(window_days.saturating_sub(1))))
        .unwrap_or(as_of);

    let mut by_ticker: HashMap<&Ticker, f64> = HashMap::new();
    for trade in trades {
        if trade.executed_at >= window_start && trade.executed_at <= as_of {
            *by_ticker.entry(&trade.ticker).or_default() += trade.premium;
        }
    }

    let mut ranked: Vec<TickerPremium> = by_ticker
        .into_iter()
        .map(|(ticker, premium)| TickerPremium {
            ticker: ticker.clone(),
            premium,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.premium
            .partial_cmp(&a.premium)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ticker.as_str().cmp(b.ticker.as_str()))
    });
    ranked.truncate(n);
    ranked
}

/// Cumulative collected premium per day over the trailing `days` ending
/// at `as_of`. Premium collected before the window seeds the first
/// point, so the chart starts at the portfolio's running total rather
/// than zero.
pub fn portfolio_series(trades: &[Trade], days: u32, as_of: Date) -> Vec<PortfolioPoint> {
    let start = as_of
        .checked_sub(time::Duration::days(i64::from(days.saturating_sub(1))))
        .unwrap_or(as_of);

    let mut baseline = 0.0;
    let mut per_day: HashMap<Date, f64> = HashMap::new();
    for trade in trades {
        if trade.executed_at < start {
            baseline += trade.premium;
        } else if trade.executed_at <= as_of {
            *per_day.entry(trade.executed_at).or_default() += trade.premium;
        }
    }

    let mut series = Vec::new();
    let mut cumulative = baseline;
    let mut date = start;
    loop {
        cumulative += per_day.get(&date).copied().unwrap_or(0.0);
        series.push(PortfolioPoint {
            date,
            cumulative_premium: cumulative,
        });
        if date >= as_of {
            break;
        }
        match date.next_day() {
            Some(next) => date = next,
            None => break,
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn day(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid date")
    }

    fn trade(symbol: &str, side: OptionSide, premium: f64, executed_at: Date) -> Trade {
        Trade {
            ticker: Ticker::parse(symbol).expect("valid ticker"),
            side,
            premium,
            executed_at,
        }
    }

    #[test]
    fn position_totals_sum_both_legs() {
        let positions = vec![
            Position {
                ticker: Ticker::parse("SPY").expect("valid"),
                cc_premium: 120.0,
                csp_premium: 80.0,
            },
            Position {
                ticker: Ticker::parse("AAPL").expect("valid"),
                cc_premium: 0.0,
                csp_premium: 45.5,
            },
        ];

        let totals = position_totals(&positions);
        assert_eq!(totals.cc_premium, 120.0);
        assert_eq!(totals.csp_premium, 125.5);
        assert_eq!(totals.total_premium, 245.5);
    }

    #[test]
    fn premium_summary_buckets_by_window() {
        let as_of = day(2026, Month::August, 30);
        let trades = vec![
            trade("SPY", OptionSide::CoveredCall, 100.0, day(2026, Month::August, 28)),
            trade("SPY", OptionSide::CashSecuredPut, 50.0, day(2026, Month::August, 3)),
            trade("AAPL", OptionSide::CoveredCall, 25.0, day(2026, Month::February, 10)),
            trade("AAPL", OptionSide::CoveredCall, 10.0, day(2025, Month::December, 31)),
        ];

        let summary = premium_summary(&trades, as_of);
        assert_eq!(summary.week, 100.0);
        assert_eq!(summary.month, 150.0);
        assert_eq!(summary.ytd, 175.0);
        assert_eq!(summary.all_time, 185.0);
    }

    #[test]
    fn premium_summary_ignores_trades_after_anchor() {
        let as_of = day(2026, Month::August, 30);
        let trades = vec![trade(
            "SPY",
            OptionSide::CoveredCall,
            999.0,
            day(2026, Month::September, 1),
        )];

        let summary = premium_summary(&trades, as_of);
        assert_eq!(summary.all_time, 0.0);
    }

    #[test]
    fn top_performers_ranks_descending_and_truncates() {
        let as_of = day(2026, Month::August, 30);
        let trades = vec![
            trade("SPY", OptionSide::CoveredCall, 50.0, day(2026, Month::August, 25)),
            trade("SPY", OptionSide::CashSecuredPut, 30.0, day(2026, Month::August, 26)),
            trade("AAPL", OptionSide::CoveredCall, 60.0, day(2026, Month::August, 27)),
            trade("MSFT", OptionSide::CoveredCall, 10.0, day(2026, Month::August, 27)),
            trade("TSLA", OptionSide::CoveredCall, 500.0, day(2026, Month::January, 1)),
        ];

        let ranked = top_performers(&trades, 30, 2, as_of);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].ticker.as_str(), "SPY");
        assert_eq!(ranked[0].premium, 80.0);
        assert_eq!(ranked[1].ticker.as_str(), "AAPL");
    }

    #[test]
    fn portfolio_series_carries_a_baseline_into_the_window() {
        let as_of = day(2026, Month::August, 3);
        let trades = vec![
            trade("SPY", OptionSide::CoveredCall, 200.0, day(2026, Month::June, 1)),
            trade("SPY", OptionSide::CoveredCall, 50.0, day(2026, Month::August, 2)),
        ];

        let series = portfolio_series(&trades, 3, as_of);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, day(2026, Month::August, 1));
        assert_eq!(series[0].cumulative_premium, 200.0);
        assert_eq!(series[1].cumulative_premium, 250.0);
        assert_eq!(series[2].cumulative_premium, 250.0);
    }
}
