//! The lookup facade handed to view code.
//!
//! [`Lookup`] owns the installed dataset, one name index per collection and
//! the search engine. Installing a dataset is one atomic step: validate,
//! bump the generation, rebuild every index, clear the cache.

use crate::dataset::{self, Dataset, Entity, EntityKind, Item, Map, Monster, Npc, RowIndex};
use crate::dataset::ValidationReport;
use crate::error::{LookupError, Result};
use crate::index::NameIndexes;
use crate::query::relations::{self, ItemRelations, MapRelations, MonsterRelations, NpcRelations, Related};
use crate::query::{CacheStats, FilterMode, FilterRules, Fingerprint, Linked, SearchEngine, SearchOutcome};
use crate::utils::AppConfig;
use serde::Serialize;

struct Installed {
    dataset: Dataset,
    indexes: NameIndexes,
    report: ValidationReport,
}

/// Row, index and cache counts for one installed dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupStats {
    pub version: String,
    pub generation: u64,
    /// (kind, rows, distinct indexed names)
    pub collections: Vec<(EntityKind, usize, usize)>,
    pub cached_queries: usize,
    pub cache: CacheStats,
    pub validation: ValidationReport,
}

/// Searchable, drillable view over one dataset at a time
pub struct Lookup {
    installed: Option<Installed>,
    engine: SearchEngine,
    generation: u64,
}

impl Lookup {
    pub fn new(cache_capacity: usize, rules: FilterRules) -> Self {
        Self {
            installed: None,
            engine: SearchEngine::new(cache_capacity, rules),
            generation: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.effective_cache_capacity(), config.filter_rules())
    }

    /// Replace the current dataset (if any) with `dataset`
    pub fn install(&mut self, mut dataset: Dataset) -> &ValidationReport {
        let report = dataset::validate(&mut dataset);
        self.generation += 1;
        self.engine.clear_cache();
        let indexes = NameIndexes::build(&dataset);

        tracing::info!(
            version = %dataset.version,
            generation = self.generation,
            items = dataset.items.len(),
            monsters = dataset.monsters.len(),
            maps = dataset.maps.len(),
            npcs = dataset.npcs.len(),
            "dataset installed"
        );

        let installed = self.installed.insert(Installed {
            dataset,
            indexes,
            report,
        });
        &installed.report
    }

    /// True once a dataset has been installed
    pub fn is_ready(&self) -> bool {
        self.installed.is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.installed
            .as_ref()
            .map(|i| &i.dataset)
            .ok_or(LookupError::Unready)
    }

    /// Bumped on every install
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fuzzy search over the collection of `T`
    pub fn search<T>(&mut self, keyword: &str, mode: FilterMode) -> Result<SearchOutcome<'_, T>>
    where
        T: Entity + Linked,
    {
        let installed = self.installed.as_ref().ok_or(LookupError::Unready)?;
        let rows = T::rows(&installed.dataset);
        let fingerprint = Fingerprint {
            generation: self.generation,
            len: rows.len(),
        };
        let index = installed.indexes.get(T::KIND);
        Ok(self.engine.search(rows, index, fingerprint, keyword, mode))
    }

    pub fn search_items(&mut self, keyword: &str, mode: FilterMode) -> Result<SearchOutcome<'_, Item>> {
        self.search(keyword, mode)
    }

    pub fn search_monsters(&mut self, keyword: &str, mode: FilterMode) -> Result<SearchOutcome<'_, Monster>> {
        self.search(keyword, mode)
    }

    pub fn search_maps(&mut self, keyword: &str, mode: FilterMode) -> Result<SearchOutcome<'_, Map>> {
        self.search(keyword, mode)
    }

    pub fn search_npcs(&mut self, keyword: &str, mode: FilterMode) -> Result<SearchOutcome<'_, Npc>> {
        self.search(keyword, mode)
    }

    /// Resolve a relation field against the collection of `T`
    pub fn resolve_refs<T: Entity>(&self, refs: &str) -> Result<Related<'_, T>> {
        let dataset = self.dataset()?;
        Ok(relations::resolve_indices(refs, T::rows(dataset)))
    }

    /// Row `index` of the collection of `T`
    pub fn row<T: Entity>(&self, index: RowIndex) -> Result<&T> {
        let rows = T::rows(self.dataset()?);
        rows.get(index).ok_or(LookupError::RowOutOfRange {
            kind: T::KIND,
            index,
            len: rows.len(),
        })
    }

    pub fn item_relations(&self, index: RowIndex) -> Result<ItemRelations<'_>> {
        let item = self.row::<Item>(index)?;
        Ok(ItemRelations::new(self.dataset()?, index, item))
    }

    pub fn monster_relations(&self, index: RowIndex) -> Result<MonsterRelations<'_>> {
        let monster = self.row::<Monster>(index)?;
        Ok(MonsterRelations::new(self.dataset()?, monster))
    }

    pub fn map_relations(&self, index: RowIndex) -> Result<MapRelations<'_>> {
        let map = self.row::<Map>(index)?;
        Ok(MapRelations::new(self.dataset()?, index, map))
    }

    pub fn npc_relations(&self, index: RowIndex) -> Result<NpcRelations<'_>> {
        let npc = self.row::<Npc>(index)?;
        Ok(NpcRelations::new(self.dataset()?, npc))
    }

    /// Rebuild one collection's name index from the installed rows.
    ///
    /// Also drops cached results, which may have been computed against the
    /// previous index.
    pub fn rebuild_index(&mut self, kind: EntityKind) -> Result<()> {
        let installed = self.installed.as_mut().ok_or(LookupError::Unready)?;
        installed.indexes.rebuild(&installed.dataset, kind);
        self.engine.clear_cache();
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.engine.clear_cache();
    }

    pub fn set_filter_rules(&mut self, rules: FilterRules) {
        self.engine.set_rules(rules);
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.engine.cache_stats()
    }

    pub fn stats(&self) -> Result<LookupStats> {
        let installed = self.installed.as_ref().ok_or(LookupError::Unready)?;
        let collections = EntityKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    installed.dataset.len_of(kind),
                    installed.indexes.get(kind).len(),
                )
            })
            .collect();

        Ok(LookupStats {
            version: installed.dataset.version.clone(),
            generation: self.generation,
            collections,
            cached_queries: self.engine.cache().len(),
            cache: self.engine.cache_stats(),
            validation: installed.report.clone(),
        })
    }
}

impl Default for Lookup {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
