//! Process-wide in-memory cache with per-entry time-to-live
//!
//! Entries are immutable snapshots replaced wholesale on refresh; concurrent
//! writers for the same key simply race and the last write wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

struct StoredEntry<T> {
    value: T,
    expires_at: Instant,
}

/// String-keyed cache of cloneable values
pub struct TtlCache<T> {
    store: Mutex<HashMap<String, StoredEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    fn store(&self) -> MutexGuard<'_, HashMap<String, StoredEntry<T>>> {
        // entries are replaced whole, so a poisoned map is still consistent
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a value with a time-to-live (TTL), replacing any previous entry.
    ///
    /// Expired entries under other keys are swept on every write, so the map
    /// never holds more than the keys written within one TTL.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub fn put(&self, key: &str, value: T, ttl: Duration) {
        let now = Instant::now();
        let mut store = self.store();

        let before = store.len();
        store.retain(|_, entry| now < entry.expires_at);
        let swept = before - store.len();
        if swept > 0 {
            tracing::debug!("Swept {} expired entries", swept);
        }

        let entry = StoredEntry {
            value,
            expires_at: now + ttl,
        };
        store.insert(key.to_string(), entry);
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub fn get(&self, key: &str) -> Option<T> {
        let mut store = self.store();
        match store.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                tracing::debug!("Key found and still fresh");
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!("Key found but expired");
                store.remove(key);
                None
            }
            None => {
                tracing::debug!("Key not found");
                None
            }
        }
    }

    /// Manually removes a key from the cache.
    pub fn remove(&self, key: &str) {
        self.store().remove(key);
    }

    /// Number of stored entries, expired ones included until the next write
    #[must_use]
    pub fn len(&self) -> usize {
        self.store().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(30 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_returned() {
        let cache = TtlCache::new();
        cache.put("Tel Aviv", 21, TTL);

        tokio::time::advance(Duration::from_secs(29 * 60)).await;
        assert_eq!(cache.get("Tel Aviv"), Some(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = TtlCache::new();
        cache.put("Tel Aviv", 21, TTL);

        tokio::time::advance(TTL).await;
        assert_eq!(cache.get("Tel Aviv"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_exact_strings() {
        let cache = TtlCache::new();
        cache.put("Haifa", 1, TTL);
        assert_eq!(cache.get("haifa"), None);
        assert_eq!(cache.get("Haifa "), None);
        assert_eq!(cache.get("Haifa"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_sweeps_expired_keys() {
        let cache = TtlCache::new();
        for i in 0..1000 {
            cache.put(&format!("city-{i}"), i, TTL);
        }
        assert_eq!(cache.len(), 1000);

        tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;
        cache.put("Eilat", 7, TTL);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("Eilat"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_keeps_fresh_keys() {
        let cache = TtlCache::new();
        cache.put("Haifa", 1, TTL);
        tokio::time::advance(Duration::from_secs(10 * 60)).await;
        cache.put("Jerusalem", 2, TTL);
        tokio::time::advance(Duration::from_secs(25 * 60)).await;
        cache.put("Eilat", 3, TTL);

        // Haifa expired at 30 min; Jerusalem is still fresh at 35 min
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("Jerusalem"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_overwrites_and_remove_evicts() {
        let cache = TtlCache::new();
        cache.put("Jerusalem", 1, TTL);
        cache.put("Jerusalem", 2, TTL);
        assert_eq!(cache.get("Jerusalem"), Some(2));
        assert_eq!(cache.len(), 1);

        cache.remove("Jerusalem");
        assert_eq!(cache.get("Jerusalem"), None);
    }
}
