pub mod name_index;

pub use name_index::NameIndex;

use crate::dataset::{Dataset, EntityKind, Item, Map, Monster, Npc};

/// One [`NameIndex`] per entity kind
#[derive(Debug, Clone, Default)]
pub struct NameIndexes {
    by_kind: [NameIndex; 4],
}

impl NameIndexes {
    /// Build all four indexes for a dataset
    pub fn build(dataset: &Dataset) -> Self {
        let mut indexes = Self::default();
        for kind in EntityKind::ALL {
            indexes.rebuild(dataset, kind);
        }
        indexes
    }

    /// Replace the index of one kind with a fresh build
    pub fn rebuild(&mut self, dataset: &Dataset, kind: EntityKind) {
        self.by_kind[kind.slot()] = match kind {
            EntityKind::Item => NameIndex::build::<Item>(&dataset.items),
            EntityKind::Monster => NameIndex::build::<Monster>(&dataset.monsters),
            EntityKind::Map => NameIndex::build::<Map>(&dataset.maps),
            EntityKind::Npc => NameIndex::build::<Npc>(&dataset.npcs),
        };
    }

    pub fn get(&self, kind: EntityKind) -> &NameIndex {
        &self.by_kind[kind.slot()]
    }
}
