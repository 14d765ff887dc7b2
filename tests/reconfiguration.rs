//! Behavior-driven tests for client reconfiguration
//!
//! These tests verify HOW settings changes propagate: refreshing the
//! handle must produce a client with the new key and tier, and the new
//! client must start with an empty cache.

use std::sync::Arc;

use wheeltrack_core::{
    Capability, ClientHandle, MemorySettingsStore, RecordingHttpClient, Ticker, Tier,
    API_KEY_SETTING, TIER_SETTING,
};

const PREV_CLOSE_BODY: &str =
    r#"{"status":"OK","results":[{"c":101.5,"o":100.0,"h":102.0,"l":99.5}]}"#;

#[tokio::test]
async fn when_settings_change_refresh_builds_a_client_with_the_new_config() {
    // Given: A handle built from empty settings
    let settings = MemorySettingsStore::new();
    let http: Arc<RecordingHttpClient> = Arc::new(RecordingHttpClient::new());
    let handle = ClientHandle::from_settings(&settings, http.clone());

    assert_eq!(handle.current().config().tier, Tier::Free);
    assert!(handle.current().config().api_key.is_empty());

    // When: The user saves a key and tier, then refreshes
    settings.set(API_KEY_SETTING, "pk_new");
    settings.set(TIER_SETTING, "advanced");
    handle.refresh(&settings, http);

    // Then: The swapped-in client carries the new configuration
    let client = handle.current();
    assert_eq!(client.config().api_key, "pk_new");
    assert_eq!(client.config().tier, Tier::Advanced);
    assert!(client.has_capability(Capability::RealtimeQuotes));
}

#[tokio::test]
async fn when_the_handle_refreshes_the_new_client_has_an_empty_cache() {
    // Given: A configured handle whose client has a primed cache
    let settings = MemorySettingsStore::new();
    settings.set(API_KEY_SETTING, "pk_old");
    settings.set(TIER_SETTING, "starter");

    let http = Arc::new(RecordingHttpClient::new());
    http.push_json(PREV_CLOSE_BODY);
    let handle = ClientHandle::from_settings(&settings, http.clone());

    let ticker = Ticker::parse("SPY").expect("valid");
    let _ = handle.current().previous_close(&ticker).await;
    assert_eq!(handle.current().cache().len().await, 1, "cache primed");

    // When: The handle refreshes
    settings.set(API_KEY_SETTING, "pk_new");
    handle.refresh(&settings, http.clone());

    // Then: The new client starts cold and must refetch
    assert!(handle.current().cache().is_empty().await);

    http.push_json(PREV_CLOSE_BODY);
    let _ = handle.current().previous_close(&ticker).await;
    assert_eq!(http.request_count(), 2, "second fetch must hit the transport");
}

#[tokio::test]
async fn an_outstanding_client_reference_survives_a_refresh() {
    // Given: A caller holding the pre-refresh client
    let settings = MemorySettingsStore::new();
    settings.set(API_KEY_SETTING, "pk_old");
    let http: Arc<RecordingHttpClient> = Arc::new(RecordingHttpClient::new());
    let handle = ClientHandle::from_settings(&settings, http.clone());
    let held = handle.current();

    // When: The handle refreshes underneath it
    settings.set(API_KEY_SETTING, "pk_new");
    handle.refresh(&settings, http);

    // Then: The held reference still answers with its original config
    assert_eq!(held.config().api_key, "pk_old");
    assert_eq!(handle.current().config().api_key, "pk_new");
}
