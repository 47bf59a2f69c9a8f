use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at_ms: f64,
}

/// Time-to-live cache keyed by endpoint URL.
///
/// Timestamps are passed in by the caller (`js_sys::Date::now()` in the
/// browser) so expiry is deterministic under test.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    ttl_ms: f64,
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl_ms: f64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    pub fn ttl_ms(&self) -> f64 {
        self.ttl_ms
    }

    /// Entry for `key` if it is younger than the TTL.
    pub fn get(&self, key: &str, now_ms: f64) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| now_ms - entry.stored_at_ms < self.ttl_ms)
            .map(|entry| entry.value.clone())
    }

    /// Store `value`, dropping whatever has expired by `now_ms`.
    pub fn insert(&mut self, key: impl Into<String>, value: V, now_ms: f64) {
        self.purge_expired(now_ms);
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at_ms: now_ms,
            },
        );
    }

    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every key starting with `prefix`; returns how many went.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len()
    }

    pub fn purge_expired(&mut self, now_ms: f64) {
        let ttl = self.ttl_ms;
        self.entries
            .retain(|_, entry| now_ms - entry.stored_at_ms < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_expire_after_ttl() {
        let mut cache = TtlCache::new(30_000.0);
        cache.insert("/api/dashboard/analytics?timeframe=7d", 42u32, 1_000.0);

        assert_eq!(cache.get("/api/dashboard/analytics?timeframe=7d", 1_000.0), Some(42));
        assert_eq!(cache.get("/api/dashboard/analytics?timeframe=7d", 30_999.0), Some(42));
        assert_eq!(cache.get("/api/dashboard/analytics?timeframe=7d", 31_000.0), None);
        assert_eq!(cache.get("/api/dashboard/analytics?timeframe=30d", 1_000.0), None);
    }

    #[test]
    fn test_reinsert_refreshes_timestamp() {
        let mut cache = TtlCache::new(100.0);
        cache.insert("k", "old", 0.0);
        cache.insert("k", "new", 90.0);
        assert_eq!(cache.get("k", 150.0), Some("new"));
    }

    #[test]
    fn test_invalidation() {
        let mut cache = TtlCache::new(1_000.0);
        cache.insert("/api/business/hours", 1, 0.0);
        cache.insert("/api/business/profile", 2, 0.0);
        cache.insert("/api/ai-agent/settings", 3, 0.0);

        assert!(cache.invalidate("/api/ai-agent/settings"));
        assert!(!cache.invalidate("/api/ai-agent/settings"));
        assert_eq!(cache.invalidate_prefix("/api/business/"), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired_keeps_fresh_entries() {
        let mut cache = TtlCache::new(50.0);
        cache.insert("stale", 1, 0.0);
        cache.insert("fresh", 2, 40.0);
        cache.purge_expired(60.0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh", 60.0), Some(2));
    }

    #[test]
    fn test_insert_drops_expired_entries() {
        let mut cache = TtlCache::new(30_000.0);
        cache.insert("/api/dashboard/analytics?timeframe=7d", 1, 0.0);
        cache.insert("/api/dashboard/analytics?timeframe=30d", 2, 10_000.0);
        assert_eq!(cache.len(), 2);

        cache.insert("/api/business/theme", 3, 35_000.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("/api/dashboard/analytics?timeframe=30d", 35_000.0), Some(2));
        assert_eq!(cache.get("/api/business/theme", 35_000.0), Some(3));
    }
}
