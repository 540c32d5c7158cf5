//! Time-bounded local cache in front of the remote store.
#![allow(dead_code)]
//!
//! Entries are keyed by identifier and overwritten on every successful save
//! or load of that identifier. A load within the freshness window returns the
//! cached record with `from_cache = true` and zero load time, skipping the
//! round trip entirely.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::models::resume::Resume;
use crate::store::{LoadOutcome, RecentOutcome, ResumeStore, SaveOutcome};

/// Cache entries are trusted for five minutes.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    data: Resume,
    stored_at: Instant,
}

/// Identifier-keyed cache with a fixed freshness window.
pub struct StoreCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::with_ttl(FRESHNESS_WINDOW)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores (or overwrites) the entry for `id`.
    pub fn put(&self, id: &str, data: Resume) {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.insert(
            id.to_string(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Returns the cached record if it is still inside the freshness window.
    pub fn get_fresh(&self, id: &str) -> Option<Resume> {
        let entries = self.entries.lock().expect("cache lock");
        let entry = entries.get(id)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StoreCache {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Caching store wrapper
// ────────────────────────────────────────────────────────────────────────────

/// Wraps any [`ResumeStore`] with the local cache.
pub struct CachedStore<S> {
    inner: S,
    cache: StoreCache,
}

impl<S> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: StoreCache::new(),
        }
    }

    pub fn with_cache(inner: S, cache: StoreCache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ResumeStore> ResumeStore for CachedStore<S> {
    async fn save(&self, record: &Resume, id: Option<&str>) -> SaveOutcome {
        let outcome = self.inner.save(record, id).await;
        if outcome.success {
            if let Some(saved_id) = &outcome.id {
                self.cache.put(saved_id, record.clone());
            }
        }
        outcome
    }

    async fn load(&self, id: &str) -> LoadOutcome {
        if let Some(data) = self.cache.get_fresh(id) {
            return LoadOutcome {
                data: Some(data),
                success: true,
                from_cache: true,
                load_ms: 0.0,
                message: None,
            };
        }
        let outcome = self.inner.load(id).await;
        if outcome.success {
            if let Some(data) = &outcome.data {
                self.cache.put(id, data.clone());
            }
        }
        outcome
    }

    async fn list_recent(&self, max: usize) -> RecentOutcome {
        self.inner.list_recent(max).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ops::{self, ScalarField};
    use crate::store::MemoryStore;

    fn named(name: &str) -> Resume {
        ops::set_field(&Resume::new(), ScalarField::Name, name)
    }

    #[test]
    fn test_fresh_entry_hits() {
        let cache = StoreCache::new();
        cache.put("r1", named("Jane"));
        let hit = cache.get_fresh("r1").expect("fresh");
        assert_eq!(hit.name, "Jane");
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = StoreCache::with_ttl(Duration::ZERO);
        cache.put("r1", named("Jane"));
        assert!(cache.get_fresh("r1").is_none());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let cache = StoreCache::new();
        cache.put("r1", named("Jane"));
        cache.put("r1", named("June"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh("r1").unwrap().name, "June");
    }

    #[tokio::test]
    async fn test_cached_store_short_circuits_second_load() {
        let store = CachedStore::new(MemoryStore::new());
        let saved = store.save(&named("Jane"), None).await;
        let id = saved.id.expect("new id");

        let first = store.load(&id).await;
        // The save already primed the cache.
        assert!(first.from_cache);
        assert_eq!(first.load_ms, 0.0);
        assert_eq!(first.data.unwrap().name, "Jane");
    }

    #[tokio::test]
    async fn test_stale_cache_falls_through_to_store_and_reprimes() {
        let store = CachedStore::with_cache(MemoryStore::new(), StoreCache::with_ttl(Duration::ZERO));
        let id = store.save(&named("Jane"), None).await.id.unwrap();

        let loaded = store.load(&id).await;
        assert!(loaded.success);
        assert!(!loaded.from_cache, "zero-ttl cache can never be fresh");
    }

    #[tokio::test]
    async fn test_failed_load_does_not_populate_cache() {
        let store = CachedStore::new(MemoryStore::new());
        let missing = store.load("nope").await;
        assert!(!missing.success);
        assert!(store.cache.is_empty());
    }
}
