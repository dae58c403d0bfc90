//! Bounded result cache for keyword searches.
//!
//! Entries are evicted strictly in insertion order: reads go through
//! [`LruCache::peek`], which never touches recency, so the least recently
//! *used* entry of the underlying [`LruCache`] is always the oldest inserted.

use crate::dataset::{EntityKind, RowIndex};
use crate::query::filter::FilterMode;
use crate::query::matcher::fold_str;
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Default number of cached result sets
pub const DEFAULT_CAPACITY: usize = 50;

/// Identity of the dataset a result set was computed against.
///
/// The generation is bumped on every dataset install, so a swap to a dataset
/// of identical size still invalidates old entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint {
    pub generation: u64,
    pub len: usize,
}

/// Composite cache key: domain, normalized keyword, fingerprint.
///
/// The domain is the collection plus the filter mode, since cached rows are
/// already filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub domain: EntityKind,
    pub filter: FilterMode,
    pub keyword: String,
    pub fingerprint: Fingerprint,
}

impl CacheKey {
    pub fn new(
        domain: EntityKind,
        filter: FilterMode,
        keyword: &str,
        fingerprint: Fingerprint,
    ) -> Self {
        Self {
            domain,
            filter,
            keyword: fold_str(keyword),
            fingerprint,
        }
    }

    /// String form used as the map key
    pub fn render(&self) -> String {
        let filter = match self.filter {
            FilterMode::All => "all",
            FilterMode::Linked => "linked",
        };
        format!(
            "{}:{}|g{}|n{}|{}",
            self.domain.tag(),
            filter,
            self.fingerprint.generation,
            self.fingerprint.len,
            self.keyword
        )
    }
}

/// Counters for cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }
}

/// FIFO-bounded map from rendered [`CacheKey`] to matching row indices
pub struct SearchCache {
    entries: LruCache<String, Vec<RowIndex>>,
    stats: CacheStats,
}

impl SearchCache {
    /// A capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Copy of the cached rows for `key`, if present
    pub fn get(&mut self, key: &CacheKey) -> Option<Vec<RowIndex>> {
        let rendered = key.render();
        match self.entries.peek(&rendered) {
            Some(rows) => {
                self.stats.hits += 1;
                tracing::debug!(key = %rendered, rows = rows.len(), "search cache hit");
                Some(rows.clone())
            }
            None => {
                self.stats.misses += 1;
                tracing::debug!(key = %rendered, "search cache miss");
                None
            }
        }
    }

    /// Store a copy of `rows`, evicting the oldest entry when full
    pub fn put(&mut self, key: &CacheKey, rows: &[RowIndex]) {
        if let Some((evicted, _)) = self.entries.push(key.render(), rows.to_vec())
            && evicted != key.render()
        {
            self.stats.evictions += 1;
            tracing::debug!(key = %evicted, "search cache eviction");
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains(&key.render())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FP: Fingerprint = Fingerprint { generation: 1, len: 10 };

    fn key(keyword: &str) -> CacheKey {
        CacheKey::new(EntityKind::Item, FilterMode::Linked, keyword, FP)
    }

    #[test]
    fn test_key_normalizes_case_only() {
        assert_eq!(key("Fire ").keyword, "fire ");
        assert_eq!(key("FIRE").render(), key("fire").render());
        assert_ne!(
            key("fire").render(),
            CacheKey::new(EntityKind::Monster, FilterMode::Linked, "fire", FP).render()
        );
        assert_ne!(
            key("fire").render(),
            CacheKey::new(EntityKind::Item, FilterMode::All, "fire", FP).render()
        );
    }

    #[test]
    fn test_fingerprint_separates_generations() {
        let at = |generation| Fingerprint { generation, len: 10 };
        let old = CacheKey::new(EntityKind::Item, FilterMode::Linked, "fire", at(1));
        let new = CacheKey::new(EntityKind::Item, FilterMode::Linked, "fire", at(2));
        assert_ne!(old.render(), new.render());
    }

    #[test]
    fn test_get_returns_copy() {
        let mut cache = SearchCache::new(4);
        cache.put(&key("a"), &[1, 2, 3]);

        let mut rows = cache.get(&key("a")).unwrap();
        rows.push(99);
        rows[0] = 42;

        assert_eq!(cache.get(&key("a")).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut cache = SearchCache::new(DEFAULT_CAPACITY);
        for i in 0..=DEFAULT_CAPACITY {
            cache.put(&key(&format!("q{i}")), &[i]);
        }

        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        assert!(cache.get(&key("q0")).is_none());
        for i in 1..=DEFAULT_CAPACITY {
            assert_eq!(cache.get(&key(&format!("q{i}"))), Some(vec![i]));
        }
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reads_do_not_refresh_recency() {
        let mut cache = SearchCache::new(2);
        cache.put(&key("first"), &[0]);
        cache.put(&key("second"), &[1]);

        // A read on the oldest entry must not save it from eviction
        assert!(cache.get(&key("first")).is_some());
        cache.put(&key("third"), &[2]);

        assert!(!cache.contains(&key("first")));
        assert!(cache.contains(&key("second")));
        assert!(cache.contains(&key("third")));
    }

    #[test]
    fn test_stats_and_clear() {
        let mut cache = SearchCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);

        cache.put(&key("a"), &[]);
        assert!(cache.get(&key("a")).is_some());
        assert!(cache.get(&key("b")).is_none());
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < f32::EPSILON);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(SearchCache::new(0).capacity(), 1);
    }
}
