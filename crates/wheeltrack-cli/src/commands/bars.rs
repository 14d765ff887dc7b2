use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{AggBar, PolygonClient, Ticker, Timespan};

use crate::cli::BarsArgs;
use crate::error::CliError;

use super::parse_date;

#[derive(Debug, Serialize)]
struct BarsResponseData {
    ticker: Ticker,
    timespan: Timespan,
    bars: Vec<AggBar>,
}

pub async fn run(args: &BarsArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let timespan: Timespan = args.timespan.parse()?;
    let from = args.from.as_deref().map(parse_date).transpose()?;
    let to = args.to.as_deref().map(parse_date).transpose()?;

    let bars = client
        .aggregate_bars(&ticker, timespan, from, to, args.limit)
        .await;

    Ok(serde_json::to_value(BarsResponseData {
        ticker,
        timespan,
        bars,
    })?)
}
