//! End-to-end tests for searching and drilling down through a [`Lookup`].

mod fixtures;

use dropfinder::dataset::{self, Dataset, EntityKind, Item, Map, Monster, Npc};
use dropfinder::query::{FilterMode, FilterRules, MonsterFilter, SearchHit, is_subsequence};
use dropfinder::{Lookup, LookupError};
use fixtures::{numbered_items, sample_dataset, sample_json_path};
use proptest::prelude::*;

fn installed(dataset: Dataset) -> Lookup {
    let mut lookup = Lookup::default();
    lookup.install(dataset);
    lookup
}

fn hit_names<T>(hits: &[SearchHit<'_, T>]) -> Vec<String> {
    hits.iter().map(|hit| hit.name.to_string()).collect()
}

fn related_names<T: dataset::Entity>(related: &[(usize, &T)]) -> Vec<String> {
    related.iter().map(|(_, row)| row.name().to_string()).collect()
}

#[test]
fn test_search_then_drill_down() {
    let mut lookup = installed(sample_dataset());

    let outcome = lookup.search_items("firesw", FilterMode::Linked).unwrap();
    assert_eq!(outcome.indices(), vec![1]);
    let npc_refs = outcome.hits()[0].row.npc_refs.clone();

    let npcs = lookup.resolve_refs::<Npc>(&npc_refs).unwrap();
    assert_eq!(related_names(&npcs), vec!["Blacksmith"]);
}

#[test]
fn test_empty_keyword_lists_linked_rows_in_order() {
    let mut lookup = installed(sample_dataset());

    let linked = lookup.search_items("", FilterMode::Linked).unwrap();
    assert_eq!(linked.indices(), vec![0, 1, 2]);

    let all = lookup.search_items("", FilterMode::All).unwrap();
    assert_eq!(hit_names(all.hits()), vec!["Red Potion", "Fire Sword", "Jellopy", "Broken Shield"]);
}

#[test]
fn test_keyword_is_case_insensitive() {
    let mut lookup = installed(sample_dataset());

    let items = lookup.search_items("FIRE", FilterMode::All).unwrap();
    assert_eq!(hit_names(items.hits()), vec!["Fire Sword"]);

    let monsters = lookup.search_monsters("fIrE", FilterMode::All).unwrap();
    assert_eq!(hit_names(monsters.hits()), vec!["Fire Imp"]);
}

#[test]
fn test_keyword_whitespace_is_significant() {
    let mut lookup = installed(sample_dataset());

    // Only names containing a space before the 's' qualify
    let hits = lookup.search_items(" s", FilterMode::All).unwrap();
    assert_eq!(hit_names(hits.hits()), vec!["Fire Sword", "Broken Shield"]);
}

#[test]
fn test_non_latin_names_fold_per_character() {
    let mut lookup = installed(Dataset::new(
        "intl",
        vec![
            Item::new("ΞΊΦΟΣ", "-1", "-1"),
            Item::new("불꽃의 검", "-1", "-1"),
            Item::new("Épée de feu", "-1", "-1"),
        ],
        vec![],
        vec![],
        vec![],
    ));

    // A name must always find itself, including a word-final sigma
    assert_eq!(lookup.search_items("ΞΊΦΟΣ", FilterMode::All).unwrap().indices(), vec![0]);
    assert_eq!(lookup.search_items("σ", FilterMode::All).unwrap().indices(), vec![0]);
    assert_eq!(lookup.search_items("ξφσ", FilterMode::All).unwrap().indices(), vec![0]);

    assert_eq!(lookup.search_items("불검", FilterMode::All).unwrap().indices(), vec![1]);
    assert!(lookup.search_items("검불", FilterMode::All).unwrap().is_empty());

    assert_eq!(lookup.search_items("ÉPÉE", FilterMode::All).unwrap().indices(), vec![2]);
    assert_eq!(lookup.search_items("éf", FilterMode::All).unwrap().indices(), vec![2]);
}

#[test]
fn test_monster_filter_rules() {
    let mut lookup = installed(sample_dataset());
    assert_eq!(lookup.search_monsters("", FilterMode::Linked).unwrap().indices(), vec![0, 1]);
    assert_eq!(lookup.search_monsters("", FilterMode::All).unwrap().indices(), vec![0, 1, 2]);

    lookup.set_filter_rules(FilterRules {
        monster: MonsterFilter::HasDropsAndMaps,
    });
    assert_eq!(lookup.search_monsters("o", FilterMode::Linked).unwrap().indices(), vec![0]);
}

#[test]
fn test_item_relations() {
    let lookup = installed(sample_dataset());

    let jellopy = lookup.item_relations(2).unwrap();
    assert_eq!(related_names(&jellopy.monsters), vec!["Poring", "Fire Imp"]);
    assert!(jellopy.npcs.is_empty());
    assert!(jellopy.given_by.is_empty());

    let sword = lookup.item_relations(1).unwrap();
    assert_eq!(related_names(&sword.given_by), vec!["Blacksmith"]);
}

#[test]
fn test_monster_and_map_relations() {
    let lookup = installed(sample_dataset());

    let poring = lookup.monster_relations(0).unwrap();
    assert_eq!(related_names(&poring.maps), vec!["Prontera Fields"]);
    assert_eq!(related_names(&poring.drops), vec!["Red Potion", "Jellopy"]);
    assert_eq!(poring.spawn_schedule, vec!["Every 5 min", "Night only"]);

    let fields = lookup.map_relations(0).unwrap();
    assert_eq!(related_names(&fields.npcs), vec!["Tool Dealer"]);
    assert_eq!(related_names(&fields.monsters), vec!["Poring"]);
    assert_eq!(fields.path_steps, vec!["Leave south gate", "Follow the road"]);
    assert!(fields.arrivals.is_empty());

    let magma = lookup.map_relations(1).unwrap();
    assert!(magma.npcs.is_empty());
    assert!(magma.path_steps.is_empty());
    assert_eq!(related_names(&magma.arrivals), vec!["Blacksmith"]);
}

#[test]
fn test_npc_relations() {
    let lookup = installed(sample_dataset());

    let smith = lookup.npc_relations(1).unwrap();
    assert_eq!(related_names(&smith.items_taken), vec!["Jellopy"]);
    assert_eq!(related_names(&smith.items_given), vec!["Fire Sword"]);
    assert_eq!(related_names(&smith.transfer_targets), vec!["Magma Dungeon"]);

    assert!(matches!(
        lookup.npc_relations(9),
        Err(LookupError::RowOutOfRange { kind: EntityKind::Npc, index: 9, len: 2 })
    ));
}

#[test]
fn test_bad_refs_resolve_to_nothing() {
    let lookup = installed(sample_dataset());

    assert!(lookup.resolve_refs::<Map>("-1").unwrap().is_empty());
    assert!(lookup.resolve_refs::<Map>("").unwrap().is_empty());
    assert_eq!(related_names(&lookup.resolve_refs::<Map>("1,,x,7,0").unwrap()), vec![
        "Magma Dungeon",
        "Prontera Fields"
    ]);
}

#[test]
fn test_repeated_keyword_is_served_from_cache() {
    let mut lookup = installed(sample_dataset());

    let first = lookup.search_items("po", FilterMode::Linked).unwrap().indices();
    let second = lookup.search_items("PO", FilterMode::Linked).unwrap().indices();
    assert_eq!(first, second);

    let stats = lookup.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn test_cache_evicts_oldest_after_fifty_keywords() {
    let mut lookup = installed(numbered_items(20));

    for i in 0..51 {
        lookup.search_items(&format!("item {i}"), FilterMode::Linked).unwrap();
    }

    let stats = lookup.stats().unwrap();
    assert_eq!(stats.cached_queries, 50);
    assert_eq!(stats.cache.evictions, 1);

    // The first keyword was evicted, so asking again is a miss
    let misses = lookup.cache_stats().misses;
    lookup.search_items("item 0", FilterMode::Linked).unwrap();
    assert_eq!(lookup.cache_stats().misses, misses + 1);
}

#[test]
fn test_empty_keyword_clears_cache() {
    let mut lookup = installed(sample_dataset());
    lookup.search_items("sword", FilterMode::Linked).unwrap();
    lookup.search_maps("field", FilterMode::Linked).unwrap();
    assert_eq!(lookup.stats().unwrap().cached_queries, 2);

    lookup.search_npcs("", FilterMode::Linked).unwrap();
    assert_eq!(lookup.stats().unwrap().cached_queries, 0);
}

#[test]
fn test_reinstall_never_serves_stale_results() {
    let mut lookup = installed(sample_dataset());
    assert_eq!(lookup.search_items("sword", FilterMode::All).unwrap().len(), 1);

    let mut renamed = sample_dataset();
    renamed.items[1].name = "Ice Dagger".to_string();
    lookup.install(renamed);

    assert!(lookup.search_items("sword", FilterMode::All).unwrap().is_empty());
    assert_eq!(lookup.search_items("dagger", FilterMode::All).unwrap().indices(), vec![1]);
}

#[test]
fn test_rebuild_index_after_reinstall() {
    let mut lookup = installed(sample_dataset());
    lookup.search_items("potion", FilterMode::All).unwrap();
    lookup.rebuild_index(EntityKind::Item).unwrap();
    assert_eq!(lookup.stats().unwrap().cached_queries, 0);
    assert_eq!(lookup.search_items("potion", FilterMode::All).unwrap().indices(), vec![0]);
}

#[test]
fn test_no_data_versus_no_match() {
    let mut lookup = installed(Dataset::new("empty", vec![Item::new("Apple", "-1", "-1")], vec![], vec![], vec![]));

    assert!(lookup.search_monsters("", FilterMode::All).unwrap().is_no_data());
    assert!(lookup.search_monsters("slime", FilterMode::All).unwrap().is_no_data());

    let unmatched = lookup.search_items("zzz", FilterMode::All).unwrap();
    assert!(!unmatched.is_no_data());
    assert!(unmatched.is_empty());
}

#[test]
fn test_load_sample_json() {
    let dataset = dataset::load_path(&sample_json_path()).unwrap();
    assert_eq!(dataset.version, "sample");
    assert_eq!(dataset.items[0].extra.get("price"), Some(&serde_json::json!(50)));

    let mut lookup = Lookup::default();
    let report = lookup.install(dataset).clone();
    assert_eq!(report.empty_names, 0);
    assert!(report.repaired_fields > 0);

    // Loaded blob behaves like the in-memory fixture
    let expected = installed(sample_dataset());
    for kind in EntityKind::ALL {
        assert_eq!(
            lookup.stats().unwrap().collections[kind.slot()],
            expected.stats().unwrap().collections[kind.slot()]
        );
    }
    assert_eq!(lookup.row::<Item>(2).unwrap().monster_refs, "0,1");
    assert_eq!(lookup.row::<Item>(2).unwrap().npc_refs, "-1");
    assert_eq!(lookup.row::<Monster>(2).unwrap().drop_refs, "-1");
    assert_eq!(lookup.search_items("firesw", FilterMode::Linked).unwrap().indices(), vec![1]);
}

proptest! {
    #[test]
    fn prop_search_matches_scan_in_row_order(
        names in prop::collection::vec("\\PC{0,8}", 0..24),
        keyword in "\\PC{1,3}",
    ) {
        let items: Vec<Item> = names.iter().map(|n| Item::new(n.as_str(), "-1", "-1")).collect();
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| is_subsequence(&item.name, &keyword))
            .map(|(i, _)| i)
            .collect();

        let mut lookup = installed(Dataset::new("prop", items, vec![], vec![], vec![]));
        let outcome = lookup.search_items(&keyword, FilterMode::All).unwrap();
        if names.is_empty() {
            prop_assert!(outcome.is_no_data());
        } else {
            prop_assert_eq!(outcome.indices(), expected);
        }
    }
}
