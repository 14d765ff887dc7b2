use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{PolygonClient, Ticker};

use crate::cli::TickerArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct QuoteResponseData {
    ticker: Ticker,
    price: Option<f64>,
}

pub async fn run(args: &TickerArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let price = client.current_price(&ticker).await;

    Ok(serde_json::to_value(QuoteResponseData { ticker, price })?)
}
