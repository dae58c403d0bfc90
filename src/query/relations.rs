//! Relation resolution between collections.
//!
//! Every relation field uses the same convention: the `"-1"` sentinel, or a
//! comma list of row indices into a target collection. Missing, empty,
//! malformed and out-of-range ids are all normal data conditions here. They
//! are skipped, traced at debug level, and never reported as errors.

use crate::dataset::types::segments;
use crate::dataset::{Dataset, Item, Map, Monster, Npc, RowIndex};
use serde::Serialize;

/// Related rows with their positions, in source field order
pub type Related<'a, T> = Vec<(RowIndex, &'a T)>;

/// Row indices named by `refs`, left to right, skipping anything that is not
/// a valid id below `bound`
pub fn parse_refs(refs: &str, bound: usize) -> impl Iterator<Item = RowIndex> + '_ {
    segments(refs).filter_map(move |segment| match segment.parse::<RowIndex>() {
        Ok(id) if id < bound => Some(id),
        Ok(id) => {
            tracing::debug!(id, bound, "relation id out of range, skipped");
            None
        }
        Err(_) => {
            tracing::debug!(segment, "malformed relation id, skipped");
            None
        }
    })
}

/// Resolve a relation field against its target collection
pub fn resolve_refs<'a, T>(refs: &str, target: &'a [T]) -> Vec<&'a T> {
    parse_refs(refs, target.len()).map(|id| &target[id]).collect()
}

/// Like [`resolve_refs`], keeping each row's position
pub fn resolve_indices<'a, T>(refs: &str, target: &'a [T]) -> Related<'a, T> {
    parse_refs(refs, target.len())
        .map(|id| (id, &target[id]))
        .collect()
}

/// Entries of a free-text comma list (spawn schedule, path steps)
pub fn list_entries(field: &str) -> Vec<&str> {
    segments(field).collect()
}

/// Rows of `rows` whose relation field, read through `field`, names `id`
pub fn referrers<'a, T, F>(rows: &'a [T], field: F, id: RowIndex) -> Related<'a, T>
where
    F: Fn(&T) -> &str,
{
    rows.iter()
        .enumerate()
        .filter(|(_, row)| parse_refs(field(row), usize::MAX).any(|r| r == id))
        .collect()
}

/// Everything reachable from one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRelations<'a> {
    /// Monsters that drop the item
    pub monsters: Related<'a, Monster>,
    /// NPCs that sell or trade the item
    pub npcs: Related<'a, Npc>,
    /// NPCs that hand the item out in exchange for something
    pub given_by: Related<'a, Npc>,
}

/// Everything reachable from one monster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterRelations<'a> {
    pub maps: Related<'a, Map>,
    pub drops: Related<'a, Item>,
    pub spawn_schedule: Vec<&'a str>,
}

/// Everything reachable from one map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRelations<'a> {
    pub npcs: Related<'a, Npc>,
    pub path_steps: Vec<&'a str>,
    /// Monsters listing this map in their spawn maps
    pub monsters: Related<'a, Monster>,
    /// NPCs that transfer players here
    pub arrivals: Related<'a, Npc>,
}

/// Everything reachable from one NPC
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpcRelations<'a> {
    pub items_taken: Related<'a, Item>,
    pub items_given: Related<'a, Item>,
    pub transfer_targets: Related<'a, Map>,
}

impl<'a> ItemRelations<'a> {
    pub fn resolve(dataset: &'a Dataset, index: RowIndex) -> Option<Self> {
        let item = dataset.items.get(index)?;
        Some(Self::new(dataset, index, item))
    }

    /// Relations of `item`, already fetched from row `index`
    pub fn new(dataset: &'a Dataset, index: RowIndex, item: &'a Item) -> Self {
        Self {
            monsters: resolve_indices(&item.monster_refs, &dataset.monsters),
            npcs: resolve_indices(&item.npc_refs, &dataset.npcs),
            given_by: referrers(&dataset.npcs, |npc| npc.items_given.as_str(), index),
        }
    }
}

impl<'a> MonsterRelations<'a> {
    pub fn resolve(dataset: &'a Dataset, index: RowIndex) -> Option<Self> {
        let monster = dataset.monsters.get(index)?;
        Some(Self::new(dataset, monster))
    }

    pub fn new(dataset: &'a Dataset, monster: &'a Monster) -> Self {
        Self {
            maps: resolve_indices(&monster.map_refs, &dataset.maps),
            drops: resolve_indices(&monster.drop_refs, &dataset.items),
            spawn_schedule: list_entries(&monster.spawn_schedule),
        }
    }
}

impl<'a> MapRelations<'a> {
    pub fn resolve(dataset: &'a Dataset, index: RowIndex) -> Option<Self> {
        let map = dataset.maps.get(index)?;
        Some(Self::new(dataset, index, map))
    }

    /// Relations of `map`, already fetched from row `index`
    pub fn new(dataset: &'a Dataset, index: RowIndex, map: &'a Map) -> Self {
        Self {
            npcs: resolve_indices(&map.npc_refs, &dataset.npcs),
            path_steps: list_entries(&map.path_steps),
            monsters: referrers(&dataset.monsters, |monster| monster.map_refs.as_str(), index),
            arrivals: referrers(&dataset.npcs, |npc| npc.transfer_targets.as_str(), index),
        }
    }
}

impl<'a> NpcRelations<'a> {
    pub fn resolve(dataset: &'a Dataset, index: RowIndex) -> Option<Self> {
        let npc = dataset.npcs.get(index)?;
        Some(Self::new(dataset, npc))
    }

    pub fn new(dataset: &'a Dataset, npc: &'a Npc) -> Self {
        Self {
            items_taken: resolve_indices(&npc.items_taken, &dataset.items),
            items_given: resolve_indices(&npc.items_given, &dataset.items),
            transfer_targets: resolve_indices(&npc.transfer_targets, &dataset.maps),
        }
    }
}
