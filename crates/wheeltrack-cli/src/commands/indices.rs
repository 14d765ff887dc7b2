use serde_json::Value;
use wheeltrack_core::PolygonClient;

use crate::cli::IndicesArgs;
use crate::error::CliError;

pub async fn run(args: &IndicesArgs, client: &PolygonClient) -> Result<Value, CliError> {
    let performance = client.index_performance(args.days).await;

    Ok(serde_json::to_value(performance)?)
}
