use serde::Serialize;
use serde_json::Value;
use wheeltrack_core::{PolygonClient, Tier};

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct FeaturesResponseData {
    tier: Tier,
    capabilities: Vec<&'static str>,
    all_tiers: Vec<TierRow>,
}

#[derive(Debug, Serialize)]
struct TierRow {
    tier: Tier,
    capabilities: Vec<&'static str>,
}

pub fn run(client: &PolygonClient) -> Result<Value, CliError> {
    let tier = client.config().tier;

    let all_tiers = Tier::ALL
        .into_iter()
        .map(|tier| TierRow {
            tier,
            capabilities: capability_names(tier),
        })
        .collect();

    Ok(serde_json::to_value(FeaturesResponseData {
        tier,
        capabilities: capability_names(tier),
        all_tiers,
    })?)
}

fn capability_names(tier: Tier) -> Vec<&'static str> {
    tier.capabilities()
        .iter()
        .map(|capability| capability.as_str())
        .collect()
}
