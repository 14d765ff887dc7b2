//! Client configuration and the settings collaborator.
//!
//! The dashboard's settings surface owns writing; this crate only reads
//! two keys and builds an immutable [`ClientConfig`] from them. There is
//! no process-wide global: callers hold a [`ClientHandle`] and swap in a
//! freshly built client when settings change, which also guarantees the
//! new client starts with an empty cache.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock};

use crate::client::PolygonClient;
use crate::http::HttpClient;
use crate::tier::Tier;

/// Settings key holding the Polygon.io API key.
pub const API_KEY_SETTING: &str = "polygon_api_key";
/// Settings key holding the subscription tier name.
pub const TIER_SETTING: &str = "polygon_tier";

/// Read-only view of the persisted settings store.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Immutable configuration for one client instance.
///
/// Changing either field means constructing a new client; there is no
/// in-place mutation.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub tier: Tier,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, tier: Tier) -> Self {
        Self {
            api_key: api_key.into(),
            tier,
        }
    }

    /// Build from the persisted settings: missing API key defaults to
    /// empty, missing or unknown tier defaults to free.
    pub fn from_settings(settings: &dyn SettingsStore) -> Self {
        let api_key = settings.get(API_KEY_SETTING).unwrap_or_default();
        let tier = Tier::from_name(&settings.get(TIER_SETTING).unwrap_or_default());
        Self { api_key, tier }
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The API key is a secret; never let it reach logs.
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("tier", &self.tier)
            .finish()
    }
}

/// In-memory settings store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<Vec<(String, String)>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let mut entries = self.entries.write().expect("settings lock poisoned");
        entries.retain(|(existing, _)| *existing != key);
        entries.push((key, value.into()));
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().expect("settings lock poisoned");
        entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.clone())
    }
}

/// Holder for the current client instance.
///
/// `refresh` is the only supported way to apply configuration changes:
/// it builds a new client from current persisted settings and swaps the
/// shared pointer. The old client, cache included, is dropped once the
/// last outstanding reference goes away.
pub struct ClientHandle {
    inner: RwLock<Arc<PolygonClient>>,
}

impl ClientHandle {
    pub fn new(client: PolygonClient) -> Self {
        Self {
            inner: RwLock::new(Arc::new(client)),
        }
    }

    /// Lazily build the first client from persisted settings.
    pub fn from_settings(settings: &dyn SettingsStore, http: Arc<dyn HttpClient>) -> Self {
        let config = ClientConfig::from_settings(settings);
        Self::new(PolygonClient::new(config, http))
    }

    /// The current client instance.
    pub fn current(&self) -> Arc<PolygonClient> {
        self.inner
            .read()
            .expect("client handle lock poisoned")
            .clone()
    }

    /// Rebuild from current persisted settings and swap the instance in.
    pub fn refresh(&self, settings: &dyn SettingsStore, http: Arc<dyn HttpClient>) {
        let config = ClientConfig::from_settings(settings);
        let replacement = Arc::new(PolygonClient::new(config, http));
        let mut slot = self.inner.write().expect("client handle lock poisoned");
        *slot = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_settings_applies_defaults() {
        let settings = MemorySettingsStore::new();
        let config = ClientConfig::from_settings(&settings);
        assert!(config.api_key.is_empty());
        assert_eq!(config.tier, Tier::Free);
    }

    #[test]
    fn config_from_settings_reads_both_keys() {
        let settings = MemorySettingsStore::new();
        settings.set(API_KEY_SETTING, "pk_test");
        settings.set(TIER_SETTING, "advanced");

        let config = ClientConfig::from_settings(&settings);
        assert_eq!(config.api_key, "pk_test");
        assert_eq!(config.tier, Tier::Advanced);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ClientConfig::new("pk_very_secret", Tier::Free);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pk_very_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn memory_store_overwrites_existing_key() {
        let store = MemorySettingsStore::new();
        store.set(TIER_SETTING, "starter");
        store.set(TIER_SETTING, "business");
        assert_eq!(store.get(TIER_SETTING).as_deref(), Some("business"));
    }
}
