use crate::dataset::Dataset;
use crate::error::LookupError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map as JsonMap, Value};
use std::fmt;
use std::str::FromStr;

/// Row position inside one collection; the de facto identifier.
pub type RowIndex = usize;

/// Sentinel meaning "no relation" in a comma-list field.
pub const NO_RELATION: &str = "-1";

/// Non-empty, trimmed segments of a comma list; nothing for the sentinel
pub(crate) fn segments(field: &str) -> impl Iterator<Item = &str> {
    let body = if field.trim() == NO_RELATION { "" } else { field };
    body.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// The four collections of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Monster,
    Map,
    Npc,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Item,
        EntityKind::Monster,
        EntityKind::Map,
        EntityKind::Npc,
    ];

    /// Short tag used as the domain part of cache keys
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Monster => "monster",
            EntityKind::Map => "map",
            EntityKind::Npc => "npc",
        }
    }

    /// Stable slot for per-kind arrays
    pub fn slot(self) -> usize {
        match self {
            EntityKind::Item => 0,
            EntityKind::Monster => 1,
            EntityKind::Map => 2,
            EntityKind::Npc => 3,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntityKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "item" | "items" => Ok(EntityKind::Item),
            "monster" | "monsters" | "mob" | "mobs" => Ok(EntityKind::Monster),
            "map" | "maps" => Ok(EntityKind::Map),
            "npc" | "npcs" => Ok(EntityKind::Npc),
            _ => Err(LookupError::UnknownKind(s.to_string())),
        }
    }
}

/// One relation field of a row, as seen by validation and drill-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationField<'a> {
    /// Field name as it appears in the dataset blob
    pub name: &'static str,
    /// Collection the ids point into
    pub target: EntityKind,
    /// Raw comma list or [`NO_RELATION`]
    pub refs: &'a str,
}

/// Mutable handle on a relation field, used by install-time repair
pub struct RelationFieldMut<'a> {
    pub name: &'static str,
    pub target: EntityKind,
    pub refs: &'a mut String,
}

/// Common surface of every row type.
///
/// The engine, index and resolver are written once against this trait and
/// instantiated per collection.
pub trait Entity: Sized {
    const KIND: EntityKind;

    fn name(&self) -> &str;

    /// The collection of this kind inside a dataset
    fn rows(dataset: &Dataset) -> &[Self];

    fn rows_mut(dataset: &mut Dataset) -> &mut Vec<Self>;

    /// Relation fields carrying row ids into other collections
    fn relations(&self) -> Vec<RelationField<'_>>;

    fn relations_mut(&mut self) -> Vec<RelationFieldMut<'_>>;

    /// Free-text comma lists (spawn schedule, path steps)
    fn text_lists_mut(&mut self) -> Vec<&mut String> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub monster_refs: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub npc_refs: String,
    /// Display-only fields (price, icon, drop rate...) carried through untouched
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub map_refs: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub drop_refs: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub spawn_schedule: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub npc_refs: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub path_steps: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub map_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub map_coord: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub items_taken: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub items_given: String,
    #[serde(default = "no_relation", deserialize_with = "lenient_refs")]
    pub transfer_targets: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl Item {
    pub fn new(name: impl Into<String>, monster_refs: impl Into<String>, npc_refs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            monster_refs: monster_refs.into(),
            npc_refs: npc_refs.into(),
            extra: JsonMap::new(),
        }
    }
}

impl Monster {
    pub fn new(name: impl Into<String>, map_refs: impl Into<String>, drop_refs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_refs: map_refs.into(),
            drop_refs: drop_refs.into(),
            spawn_schedule: no_relation(),
            extra: JsonMap::new(),
        }
    }

    pub fn with_spawn_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.spawn_schedule = schedule.into();
        self
    }
}

impl Map {
    pub fn new(name: impl Into<String>, npc_refs: impl Into<String>, path_steps: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            npc_refs: npc_refs.into(),
            path_steps: path_steps.into(),
            extra: JsonMap::new(),
        }
    }
}

impl Npc {
    /// An NPC with a location and no relations
    pub fn new(name: impl Into<String>, map_name: impl Into<String>, map_coord: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_name: map_name.into(),
            map_coord: map_coord.into(),
            items_taken: no_relation(),
            items_given: no_relation(),
            transfer_targets: no_relation(),
            extra: JsonMap::new(),
        }
    }

    pub fn with_trade(mut self, taken: impl Into<String>, given: impl Into<String>) -> Self {
        self.items_taken = taken.into();
        self.items_given = given.into();
        self
    }

    pub fn with_transfers(mut self, targets: impl Into<String>) -> Self {
        self.transfer_targets = targets.into();
        self
    }
}

impl Entity for Item {
    const KIND: EntityKind = EntityKind::Item;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.items
    }

    fn rows_mut(dataset: &mut Dataset) -> &mut Vec<Self> {
        &mut dataset.items
    }

    fn relations(&self) -> Vec<RelationField<'_>> {
        vec![
            RelationField { name: "monsterRefs", target: EntityKind::Monster, refs: &self.monster_refs },
            RelationField { name: "npcRefs", target: EntityKind::Npc, refs: &self.npc_refs },
        ]
    }

    fn relations_mut(&mut self) -> Vec<RelationFieldMut<'_>> {
        vec![
            RelationFieldMut { name: "monsterRefs", target: EntityKind::Monster, refs: &mut self.monster_refs },
            RelationFieldMut { name: "npcRefs", target: EntityKind::Npc, refs: &mut self.npc_refs },
        ]
    }
}

impl Entity for Monster {
    const KIND: EntityKind = EntityKind::Monster;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.monsters
    }

    fn rows_mut(dataset: &mut Dataset) -> &mut Vec<Self> {
        &mut dataset.monsters
    }

    fn relations(&self) -> Vec<RelationField<'_>> {
        vec![
            RelationField { name: "mapRefs", target: EntityKind::Map, refs: &self.map_refs },
            RelationField { name: "dropRefs", target: EntityKind::Item, refs: &self.drop_refs },
        ]
    }

    fn relations_mut(&mut self) -> Vec<RelationFieldMut<'_>> {
        vec![
            RelationFieldMut { name: "mapRefs", target: EntityKind::Map, refs: &mut self.map_refs },
            RelationFieldMut { name: "dropRefs", target: EntityKind::Item, refs: &mut self.drop_refs },
        ]
    }

    fn text_lists_mut(&mut self) -> Vec<&mut String> {
        vec![&mut self.spawn_schedule]
    }
}

impl Entity for Map {
    const KIND: EntityKind = EntityKind::Map;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.maps
    }

    fn rows_mut(dataset: &mut Dataset) -> &mut Vec<Self> {
        &mut dataset.maps
    }

    fn relations(&self) -> Vec<RelationField<'_>> {
        vec![RelationField { name: "npcRefs", target: EntityKind::Npc, refs: &self.npc_refs }]
    }

    fn relations_mut(&mut self) -> Vec<RelationFieldMut<'_>> {
        vec![RelationFieldMut { name: "npcRefs", target: EntityKind::Npc, refs: &mut self.npc_refs }]
    }

    fn text_lists_mut(&mut self) -> Vec<&mut String> {
        vec![&mut self.path_steps]
    }
}

impl Entity for Npc {
    const KIND: EntityKind = EntityKind::Npc;

    fn name(&self) -> &str {
        &self.name
    }

    fn rows(dataset: &Dataset) -> &[Self] {
        &dataset.npcs
    }

    fn rows_mut(dataset: &mut Dataset) -> &mut Vec<Self> {
        &mut dataset.npcs
    }

    fn relations(&self) -> Vec<RelationField<'_>> {
        vec![
            RelationField { name: "itemsTaken", target: EntityKind::Item, refs: &self.items_taken },
            RelationField { name: "itemsGiven", target: EntityKind::Item, refs: &self.items_given },
            RelationField { name: "transferTargets", target: EntityKind::Map, refs: &self.transfer_targets },
        ]
    }

    fn relations_mut(&mut self) -> Vec<RelationFieldMut<'_>> {
        vec![
            RelationFieldMut { name: "itemsTaken", target: EntityKind::Item, refs: &mut self.items_taken },
            RelationFieldMut { name: "itemsGiven", target: EntityKind::Item, refs: &mut self.items_given },
            RelationFieldMut { name: "transferTargets", target: EntityKind::Map, refs: &mut self.transfer_targets },
        ]
    }
}

fn no_relation() -> String {
    NO_RELATION.to_string()
}

/// Text fields: numbers and booleans are stringified, anything else is empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Relation fields: a bare number is a single id, an array is joined with
/// commas, null or anything unrecognized is the sentinel
fn lenient_refs<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(parts)) => {
            let joined: Vec<String> = parts
                .into_iter()
                .filter_map(|part| match part {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            if joined.is_empty() {
                no_relation()
            } else {
                joined.join(",")
            }
        }
        _ => no_relation(),
    })
}
