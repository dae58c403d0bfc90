//! Display filters: which rows are worth listing at all.
//!
//! Each collection decides what "linked" means for its rows. A row that
//! leads nowhere (no drops, no NPCs, no path) is usually noise on a list page.

use crate::dataset::{Item, Map, Monster, NO_RELATION, Npc};
use serde::{Deserialize, Serialize};

/// Whether to apply the per-collection display filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every row, linked or not
    All,
    /// Only rows with at least one relation, as defined per collection
    #[default]
    Linked,
}

/// What counts as a linked monster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterFilter {
    /// At least one drop
    #[default]
    HasDrops,
    /// At least one drop or one map
    HasDropsOrMaps,
    /// At least one drop and one map
    HasDropsAndMaps,
}

/// Tunables for the linked filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    #[serde(default)]
    pub monster: MonsterFilter,
}

/// Per-collection "is this row linked to anything" predicate
pub trait Linked {
    fn is_linked(&self, rules: &FilterRules) -> bool;

    /// Apply `mode` on top of [`Linked::is_linked`]
    fn passes(&self, mode: FilterMode, rules: &FilterRules) -> bool {
        match mode {
            FilterMode::All => true,
            FilterMode::Linked => self.is_linked(rules),
        }
    }
}

/// A relation field that holds something other than the sentinel
fn has_refs(field: &str) -> bool {
    let field = field.trim();
    !field.is_empty() && field != NO_RELATION
}

impl Linked for Item {
    fn is_linked(&self, _rules: &FilterRules) -> bool {
        has_refs(&self.monster_refs) || has_refs(&self.npc_refs)
    }
}

impl Linked for Monster {
    fn is_linked(&self, rules: &FilterRules) -> bool {
        let drops = has_refs(&self.drop_refs);
        let maps = has_refs(&self.map_refs);
        match rules.monster {
            MonsterFilter::HasDrops => drops,
            MonsterFilter::HasDropsOrMaps => drops || maps,
            MonsterFilter::HasDropsAndMaps => drops && maps,
        }
    }
}

impl Linked for Map {
    fn is_linked(&self, _rules: &FilterRules) -> bool {
        has_refs(&self.npc_refs) || has_refs(&self.path_steps)
    }
}

impl Linked for Npc {
    fn is_linked(&self, _rules: &FilterRules) -> bool {
        has_refs(&self.items_taken) || has_refs(&self.items_given) || has_refs(&self.transfer_targets)
    }
}
