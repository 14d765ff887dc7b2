use serde_json::Value;
use wheeltrack_core::PolygonClient;

use crate::error::CliError;

pub async fn run(client: &PolygonClient) -> Result<Value, CliError> {
    let status = client.test_connection().await;

    Ok(serde_json::to_value(status)?)
}
