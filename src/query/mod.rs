pub mod cache;
pub mod engine;
pub mod filter;
pub mod matcher;
pub mod relations;

pub use cache::{CacheKey, CacheStats, Fingerprint, SearchCache};
pub use engine::{SearchEngine, SearchHit, SearchOutcome};
pub use filter::{FilterMode, FilterRules, Linked, MonsterFilter};
pub use matcher::{FuzzyPattern, fold_char, fold_str, is_subsequence, match_positions};
pub use relations::{
    ItemRelations, MapRelations, MonsterRelations, NpcRelations, Related, list_entries, parse_refs,
    referrers, resolve_indices, resolve_refs,
};
