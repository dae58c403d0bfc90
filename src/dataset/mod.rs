//! The four-collection dataset: items, monsters, maps and NPCs.
//!
//! A [`Dataset`] is always swapped as a whole. Rows are addressed by
//! position; relation fields hold comma lists of positions into another
//! collection, or the `"-1"` sentinel.
//!
//! ## Modules
//!
//! - [`types`] - Row types and the [`Entity`] trait
//! - [`validate`] - Install-time repair and the [`ValidationReport`]
//! - [`loader`] - Reading a dataset blob from disk

pub mod loader;
pub mod types;
pub mod validate;

pub use loader::load_path;
pub use types::*;
pub use validate::{ValidationReport, validate};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One game version's worth of data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub maps: Vec<Map>,
    #[serde(default)]
    pub npcs: Vec<Npc>,
}

impl Dataset {
    pub fn new(
        version: impl Into<String>,
        items: Vec<Item>,
        monsters: Vec<Monster>,
        maps: Vec<Map>,
        npcs: Vec<Npc>,
    ) -> Self {
        Self {
            version: version.into(),
            items,
            monsters,
            maps,
            npcs,
        }
    }

    /// Decode a dataset blob
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Rows of one kind, selected by type
    pub fn rows<T: Entity>(&self) -> &[T] {
        T::rows(self)
    }

    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Item => self.items.len(),
            EntityKind::Monster => self.monsters.len(),
            EntityKind::Map => self.maps.len(),
            EntityKind::Npc => self.npcs.len(),
        }
    }

    /// Name of row `index` in collection `kind`
    pub fn name_of(&self, kind: EntityKind, index: RowIndex) -> Option<&str> {
        match kind {
            EntityKind::Item => self.items.get(index).map(Entity::name),
            EntityKind::Monster => self.monsters.get(index).map(Entity::name),
            EntityKind::Map => self.maps.get(index).map(Entity::name),
            EntityKind::Npc => self.npcs.get(index).map(Entity::name),
        }
    }

    /// True when all four collections are empty
    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.iter().all(|&kind| self.len_of(kind) == 0)
    }
}
