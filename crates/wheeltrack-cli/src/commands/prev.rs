use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{PolygonClient, PrevClose, Ticker};

use crate::cli::TickerArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PrevResponseData {
    prev_close: Option<PrevClose>,
}

pub async fn run(args: &TickerArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let prev_close = client.previous_close(&ticker).await;

    Ok(serde_json::to_value(PrevResponseData { prev_close })?)
}
