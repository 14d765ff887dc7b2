use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{ContractType, OptionContract, PolygonClient, Ticker};

use crate::cli::ChainArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ChainResponseData {
    underlying: Ticker,
    contracts: Vec<OptionContract>,
}

pub async fn run(args: &ChainArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let underlying = Ticker::parse(&args.ticker)?;
    let contract_type = args
        .contract_type
        .as_deref()
        .map(str::parse::<ContractType>)
        .transpose()?;

    let contracts = client
        .options_chain(&underlying, args.expiration.as_deref(), contract_type)
        .await;

    Ok(serde_json::to_value(ChainResponseData {
        underlying,
        contracts,
    })?)
}
