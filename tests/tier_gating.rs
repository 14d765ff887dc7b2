//! Behavior-driven tests for subscription tier gating
//!
//! These tests verify HOW the system enforces entitlements: gated
//! endpoints must short-circuit before the transport, and the capability
//! table must stay monotonic across tiers.

use std::sync::Arc;

use wheeltrack_core::{
    Capability, ClientConfig, ContractType, OptionTicker, PolygonClient, RecordingHttpClient,
    Ticker, Tier,
};

fn client_for(tier: Tier, http: Arc<RecordingHttpClient>) -> PolygonClient {
    PolygonClient::new(ClientConfig::new("pk_test", tier), http)
}

// =============================================================================
// Capability Table: Monotonicity
// =============================================================================

#[test]
fn every_tier_keeps_the_base_capabilities() {
    for tier in Tier::ALL {
        assert!(
            tier.has(Capability::EndOfDayPrices),
            "{tier} must keep end-of-day prices"
        );
        assert!(
            tier.has(Capability::TickerSearch),
            "{tier} must keep ticker search"
        );
    }
}

#[test]
fn business_tier_is_a_superset_of_advanced() {
    for capability in Tier::Advanced.capabilities() {
        assert!(
            Tier::Business.has(*capability),
            "business must include {capability}"
        );
    }
}

#[test]
fn unknown_persisted_tier_name_degrades_to_free() {
    assert_eq!(Tier::from_name("enterprise"), Tier::Free);
    assert_eq!(Tier::from_name(""), Tier::Free);
}

// =============================================================================
// Entitlement Gates: Zero Network Calls
// =============================================================================

#[tokio::test]
async fn when_free_tier_requests_options_chain_no_network_call_is_made() {
    // Given: A free-tier client with a transport that records every call
    let http = Arc::new(RecordingHttpClient::new());
    let client = client_for(Tier::Free, http.clone());
    let ticker = Ticker::parse("SPY").expect("valid");

    // When: The options chain is requested
    let contracts = client.options_chain(&ticker, None, None).await;

    // Then: The result is empty and the transport was never touched
    assert!(contracts.is_empty());
    assert_eq!(http.request_count(), 0, "gate must fire before transport");
}

#[tokio::test]
async fn when_free_tier_requests_last_trade_the_gate_is_reported() {
    // Given: A free-tier client
    let http = Arc::new(RecordingHttpClient::new());
    let client = client_for(Tier::Free, http.clone());
    let ticker = Ticker::parse("AAPL").expect("valid");

    // When: The real-time last trade is fetched through the outcome API
    let outcome = client.fetch_last_trade(&ticker).await;

    // Then: The denial is distinguishable from no-data, with zero calls
    assert!(outcome.is_gated());
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn when_free_tier_requests_option_contract_result_is_empty() {
    let http = Arc::new(RecordingHttpClient::new());
    let client = client_for(Tier::Free, http.clone());
    let option_ticker = OptionTicker::parse("O:SPY251219C00650000").expect("valid");

    let contract = client.option_contract(&option_ticker).await;

    assert!(contract.is_none());
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn when_starter_tier_requests_options_chain_the_request_goes_out() {
    // Given: A starter-tier client with one scripted chain response
    let http = Arc::new(RecordingHttpClient::new());
    http.push_json(
        r#"{"status":"OK","results":[{
            "details":{"ticker":"O:SPY251219P00600000","contract_type":"put",
                       "strike_price":600.0,"expiration_date":"2025-12-19"},
            "underlying_asset":{"ticker":"SPY"}
        }]}"#,
    );
    let client = client_for(Tier::Starter, http.clone());
    let ticker = Ticker::parse("SPY").expect("valid");

    // When: The options chain is requested
    let contracts = client
        .options_chain(&ticker, None, Some(ContractType::Put))
        .await;

    // Then: The gate passes and the snapshot is normalized
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].ticker, "O:SPY251219P00600000");
    assert_eq!(http.request_count(), 1);
    assert!(
        http.recorded_requests()[0].url.contains("contract_type=put"),
        "filter must be forwarded as a query parameter"
    );
}

#[tokio::test]
async fn ticker_details_is_not_gated_even_on_free_tier() {
    // Given: A free-tier client with a scripted details response
    let http = Arc::new(RecordingHttpClient::new());
    http.push_json(r#"{"status":"OK","results":{"ticker":"SPY","name":"SPDR S&P 500 ETF"}}"#);
    let client = client_for(Tier::Free, http.clone());
    let ticker = Ticker::parse("SPY").expect("valid");

    // When: Ticker details are requested
    let details = client.ticker_details(&ticker).await;

    // Then: The request goes out despite the free tier
    assert_eq!(details.expect("details expected").name, "SPDR S&P 500 ETF");
    assert_eq!(http.request_count(), 1);
}
