use crate::dataset::{Entity, RowIndex};
use crate::index::NameIndex;
use crate::query::cache::{CacheKey, CacheStats, Fingerprint, SearchCache};
use crate::query::filter::{FilterMode, FilterRules, Linked};
use crate::query::matcher::FuzzyPattern;
use serde::Serialize;

/// One row of a search result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit<'a, T> {
    pub index: RowIndex,
    pub name: &'a str,
    pub row: &'a T,
}

/// Search result, telling "nothing loaded" apart from "nothing matched"
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a, T> {
    /// The collection has no rows at all
    NoData,
    /// Hits in row order; may be empty
    Matches(Vec<SearchHit<'a, T>>),
}

impl<'a, T> SearchOutcome<'a, T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SearchOutcome::NoData)
    }

    pub fn hits(&self) -> &[SearchHit<'a, T>] {
        match self {
            SearchOutcome::NoData => &[],
            SearchOutcome::Matches(hits) => hits,
        }
    }

    pub fn into_hits(self) -> Vec<SearchHit<'a, T>> {
        match self {
            SearchOutcome::NoData => Vec::new(),
            SearchOutcome::Matches(hits) => hits,
        }
    }

    /// Row indices of the hits, in order
    pub fn indices(&self) -> Vec<RowIndex> {
        self.hits().iter().map(|hit| hit.index).collect()
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }
}

/// Keyword search over any collection, backed by a shared result cache.
///
/// Both search paths return hits in original row order: the empty keyword
/// walks the collection directly, a non-empty keyword scans the name index
/// and sorts the matching rows before caching them.
pub struct SearchEngine {
    cache: SearchCache,
    rules: FilterRules,
}

impl SearchEngine {
    pub fn new(cache_capacity: usize, rules: FilterRules) -> Self {
        Self {
            cache: SearchCache::new(cache_capacity),
            rules,
        }
    }

    /// Search `rows` for names fuzzily matching `keyword`.
    ///
    /// `index` must have been built from `rows`, and `fingerprint` must
    /// change whenever `rows` is replaced.
    pub fn search<'a, T>(
        &mut self,
        rows: &'a [T],
        index: &NameIndex,
        fingerprint: Fingerprint,
        keyword: &str,
        mode: FilterMode,
    ) -> SearchOutcome<'a, T>
    where
        T: Entity + Linked,
    {
        if rows.is_empty() {
            return SearchOutcome::NoData;
        }

        let matched: Vec<RowIndex> = if keyword.is_empty() {
            // "Show all" must never serve a result bound to an older dataset
            self.cache.clear();
            rows.iter()
                .enumerate()
                .filter(|(_, row)| row.passes(mode, &self.rules))
                .map(|(i, _)| i)
                .collect()
        } else {
            self.search_indexed(rows, index, fingerprint, keyword, mode)
        };

        let hits = matched
            .into_iter()
            .filter_map(|index| {
                let row = rows.get(index)?;
                Some(SearchHit {
                    index,
                    name: row.name(),
                    row,
                })
            })
            .collect();

        SearchOutcome::Matches(hits)
    }

    fn search_indexed<T>(
        &mut self,
        rows: &[T],
        index: &NameIndex,
        fingerprint: Fingerprint,
        keyword: &str,
        mode: FilterMode,
    ) -> Vec<RowIndex>
    where
        T: Entity + Linked,
    {
        let key = CacheKey::new(T::KIND, mode, keyword, fingerprint);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let pattern = FuzzyPattern::new(&key.keyword);
        let mut matched: Vec<RowIndex> = index
            .lookup(|name| pattern.matches(name))
            .filter(|&i| rows.get(i).is_some_and(|row| row.passes(mode, &self.rules)))
            .collect();
        matched.sort_unstable();

        self.cache.put(&key, &matched);
        matched
    }

    /// Drop every cached result set
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn rules(&self) -> FilterRules {
        self.rules
    }

    /// Change filter rules; cached results were filtered under the old rules
    pub fn set_rules(&mut self, rules: FilterRules) {
        if rules != self.rules {
            self.rules = rules;
            self.cache.clear();
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(crate::query::cache::DEFAULT_CAPACITY, FilterRules::default())
    }
}
