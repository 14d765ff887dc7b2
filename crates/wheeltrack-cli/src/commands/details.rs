use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{PolygonClient, Ticker, TickerDetails};

use crate::cli::TickerArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct DetailsResponseData {
    details: Option<TickerDetails>,
}

pub async fn run(args: &TickerArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let details = client.ticker_details(&ticker).await;

    Ok(serde_json::to_value(DetailsResponseData { details })?)
}
