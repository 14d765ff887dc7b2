use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{PolygonClient, TickerMatch};

use crate::cli::SearchArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    matches: Vec<TickerMatch>,
}

pub async fn run(args: &SearchArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let matches = client.search_tickers(&args.query, args.limit).await;

    Ok(serde_json::to_value(SearchResponseData { matches })?)
}
