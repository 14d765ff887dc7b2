use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{OptionContract, OptionTicker, PolygonClient};

use crate::cli::ContractArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ContractResponseData {
    option_ticker: OptionTicker,
    contract: Option<OptionContract>,
}

pub async fn run(args: &ContractArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let option_ticker = OptionTicker::parse(&args.option_ticker)?;
    let contract = client.option_contract(&option_ticker).await;

    Ok(serde_json::to_value(ContractResponseData {
        option_ticker,
        contract,
    })?)
}
