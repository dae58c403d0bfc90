#![no_main]

use dropfinder::Lookup;
use dropfinder::dataset::{Dataset, EntityKind};
use dropfinder::query::{FilterMode, parse_refs};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    assert!(parse_refs(data, 64).all(|id| id < 64));

    // Arbitrary blobs must either fail to decode or install and drill cleanly
    let Ok(dataset) = Dataset::from_json_str(data) else {
        return;
    };

    let mut lookup = Lookup::default();
    lookup.install(dataset);

    let _ = lookup.search_items("a", FilterMode::Linked);
    let _ = lookup.search_monsters("", FilterMode::All);

    let Ok(stats) = lookup.stats() else {
        return;
    };
    for (kind, rows, _) in stats.collections {
        for index in 0..rows.min(8) {
            let _ = match kind {
                EntityKind::Item => lookup.item_relations(index).map(|_| ()),
                EntityKind::Monster => lookup.monster_relations(index).map(|_| ()),
                EntityKind::Map => lookup.map_relations(index).map(|_| ()),
                EntityKind::Npc => lookup.npc_relations(index).map(|_| ()),
            };
        }
    }
});
