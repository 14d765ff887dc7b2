//! Per-client TTL cache for normalized API responses.
//!
//! Entries are only ever overwritten or ignored: a read past the expiry
//! behaves as a miss but leaves the entry in place, so the map grows
//! with the set of distinct keys requested over the client's lifetime.
//! Callers that care can run [`ResponseCache::clear_expired`]; the
//! dashboard accepts the growth because a client instance rarely sees
//! more than a few dozen keys before it is replaced on reconfiguration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
}

impl CacheInner {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).and_then(|entry| {
            if Instant::now() < entry.expires_at {
                Some(entry.body.clone())
            } else {
                None
            }
        })
    }

    fn put(&mut self, key: String, body: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.map.insert(key, CacheEntry { body, expires_at });
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        self.map.retain(|_, entry| entry.expires_at > now);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// In-memory response cache owned by exactly one client instance.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached body for `key` strictly before its expiry.
    ///
    /// Expired entries are ignored, not removed.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Store `body` under `key`, unconditionally replacing any previous
    /// entry and restarting the clock with `ttl`.
    pub async fn put(&self, key: String, body: String, ttl: Duration) {
        let mut store = self.inner.write().await;
        store.put(key, body, ttl);
    }

    /// Typed read: deserialize a previously cached record.
    pub async fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let body = self.get(key).await?;
        serde_json::from_str(&body).ok()
    }

    /// Typed write: serialize a normalized record into the cache.
    ///
    /// Serialization failures drop the write; the next lookup simply
    /// misses and refetches.
    pub async fn put_record<T: Serialize>(&self, key: String, record: &T, ttl: Duration) {
        if let Ok(body) = serde_json::to_string(record) {
            self.put(key, body, ttl).await;
        }
    }

    /// Remove entries whose expiry has passed.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let cache = ResponseCache::new();
        assert!(cache.get("prev_close_SPY").await.is_none());
    }

    #[tokio::test]
    async fn put_then_get_roundtrips_before_expiry() {
        let cache = ResponseCache::new();
        cache
            .put("k".to_string(), "v1".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v1"));

        cache
            .put("k".to_string(), "v2".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn expired_entry_reads_as_miss_but_is_not_removed() {
        let cache = ResponseCache::new();
        cache
            .put("k".to_string(), "v".to_string(), Duration::ZERO)
            .await;

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(cache.get("k").await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clear_expired_sweeps_stale_entries() {
        let cache = ResponseCache::new();
        cache
            .put("stale".to_string(), "v".to_string(), Duration::ZERO)
            .await;
        cache
            .put("fresh".to_string(), "v".to_string(), Duration::from_secs(60))
            .await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.clear_expired().await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get("fresh").await.is_some());
    }

    #[tokio::test]
    async fn typed_records_roundtrip() {
        let cache = ResponseCache::new();
        cache
            .put_record("n".to_string(), &42_u32, Duration::from_secs(60))
            .await;
        assert_eq!(cache.get_record::<u32>("n").await, Some(42));
    }
}
