//! Result-set cache keyed by query and page size.
//!
//! Holds the accumulated pages of recently viewed queries so that returning to
//! a query within the staleness window restores it without a network call.
//! Lookups take `now` explicitly; entries older than the TTL read as absent.

use crate::model::{PagedResultSet, Query};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default staleness window.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Cache key: results depend on both the query and the page size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Trimmed query.
    pub query: Query,
    /// Results per page.
    pub per_page: u32,
}

impl CacheKey {
    /// Key for `query` at `per_page`.
    pub fn new(query: Query, per_page: u32) -> Self {
        Self { query, per_page }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    set: Arc<PagedResultSet>,
    stored_at: Instant,
}

/// TTL cache of paged result sets.
#[derive(Debug, Clone)]
pub struct PageCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl PageCache {
    /// Empty cache with the given staleness window.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Staleness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`. Stale entries are evicted and reported as absent.
    pub fn get(&mut self, key: &CacheKey, now: Instant) -> Option<Arc<PagedResultSet>> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            return Some(Arc::clone(&entry.set));
        }
        debug!(query = %key.query, "Evicting stale cache entry");
        self.entries.remove(key);
        None
    }

    /// Store (or replace) the result set for `key`.
    pub fn set(&mut self, key: CacheKey, set: Arc<PagedResultSet>, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                set,
                stored_at: now,
            },
        );
    }

    /// Drop the entry for `key`, if any.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included until they are looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, PageNumber};

    fn set_with_total(total: u64) -> Arc<PagedResultSet> {
        Arc::new(PagedResultSet::new().with_page(PageNumber::FIRST, Page::new(total, vec![])))
    }

    #[test]
    fn get_returns_entry_within_ttl() {
        let t0 = Instant::now();
        let mut cache = PageCache::new(Duration::from_secs(60));
        let key = CacheKey::new(Query::new("react"), 30);
        cache.set(key.clone(), set_with_total(65), t0);

        let hit = cache.get(&key, t0 + Duration::from_secs(59));
        assert_eq!(hit.and_then(|s| s.total_count()), Some(65));
    }

    #[test]
    fn get_evicts_entry_after_ttl() {
        let t0 = Instant::now();
        let mut cache = PageCache::new(Duration::from_secs(60));
        let key = CacheKey::new(Query::new("react"), 30);
        cache.set(key.clone(), set_with_total(65), t0);

        assert!(cache.get(&key, t0 + Duration::from_secs(60)).is_none());
        assert!(cache.is_empty(), "Stale entry should be evicted");
    }

    #[test]
    fn per_page_is_part_of_the_key() {
        let t0 = Instant::now();
        let mut cache = PageCache::default();
        cache.set(CacheKey::new(Query::new("react"), 30), set_with_total(1), t0);

        assert!(cache.get(&CacheKey::new(Query::new("react"), 50), t0).is_none());
    }

    #[test]
    fn invalidate_removes_only_that_key() {
        let t0 = Instant::now();
        let mut cache = PageCache::default();
        let a = CacheKey::new(Query::new("a"), 30);
        let b = CacheKey::new(Query::new("b"), 30);
        cache.set(a.clone(), set_with_total(1), t0);
        cache.set(b.clone(), set_with_total(2), t0);

        assert!(cache.invalidate(&a));
        assert!(!cache.invalidate(&a));
        assert!(cache.get(&a, t0).is_none());
        assert!(cache.get(&b, t0).is_some());
    }

    #[test]
    fn set_replaces_and_refreshes_timestamp() {
        let t0 = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut cache = PageCache::new(ttl);
        let key = CacheKey::new(Query::new("x"), 30);
        cache.set(key.clone(), set_with_total(1), t0);
        cache.set(key.clone(), set_with_total(2), t0 + Duration::from_secs(8));

        let hit = cache.get(&key, t0 + Duration::from_secs(15));
        assert_eq!(hit.and_then(|s| s.total_count()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = PageCache::default();
        cache.set(CacheKey::new(Query::new("x"), 30), set_with_total(1), Instant::now());
        cache.clear();
        assert!(cache.is_empty());
    }
}
