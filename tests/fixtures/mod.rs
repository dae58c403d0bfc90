//! Shared datasets for integration tests.

use dropfinder::dataset::{Dataset, Item, Map, Monster, Npc};
use std::path::PathBuf;

/// Path of the JSON copy of [`sample_dataset`]
pub fn sample_json_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample.json")
}

/// Small cross-linked dataset
///
/// items:    0 Red Potion, 1 Fire Sword, 2 Jellopy, 3 Broken Shield (unlinked)
/// monsters: 0 Poring, 1 Fire Imp, 2 Ghost (no drops)
/// maps:     0 Prontera Fields, 1 Magma Dungeon
/// npcs:     0 Tool Dealer, 1 Blacksmith
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        "sample",
        vec![
            Item::new("Red Potion", "0", "0"),
            Item::new("Fire Sword", "-1", "1"),
            Item::new("Jellopy", "0,1", "-1"),
            Item::new("Broken Shield", "-1", "-1"),
        ],
        vec![
            Monster::new("Poring", "0", "0,2").with_spawn_schedule("Every 5 min,Night only"),
            Monster::new("Fire Imp", "1", "2"),
            Monster::new("Ghost", "-1", "-1"),
        ],
        vec![
            Map::new("Prontera Fields", "0", "Leave south gate,Follow the road"),
            Map::new("Magma Dungeon", "-1", "-1"),
        ],
        vec![
            Npc::new("Tool Dealer", "Prontera Fields", "120,88").with_trade("-1", "0"),
            Npc::new("Blacksmith", "Geffen", "40,60")
                .with_trade("2", "1")
                .with_transfers("1"),
        ],
    )
}

/// `count` linked items named `Item 0`, `Item 1`, ...
pub fn numbered_items(count: usize) -> Dataset {
    let items = (0..count)
        .map(|i| Item::new(format!("Item {i}"), "-1", "0"))
        .collect();
    Dataset::new("numbered", items, vec![], vec![], vec![Npc::new("Vendor", "Town", "1,1")])
}
