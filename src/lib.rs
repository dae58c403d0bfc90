//! # dropfinder - Drop Table Lookup
//!
//! dropfinder is an in-memory lookup core for game drop-rate reference data:
//! items, monsters, maps and NPCs. Names are found with a fuzzy subsequence
//! search, and a selected row is expanded by following its relation fields
//! into the other collections.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`dataset`] - Row types, install-time validation, blob loading
//! - [`index`] - Inverted name index, one per collection
//! - [`query`] - Fuzzy matcher, FIFO result cache, search engine, relations
//! - [`lookup`] - The facade owning dataset, indexes and engine
//! - [`output`] - Terminal and HTML rendering of results
//! - [`utils`] - Configuration, logging, HTML escaping
//!
//! ## Quick Start
//!
//! ```
//! use dropfinder::dataset::{Dataset, Item, Npc};
//! use dropfinder::query::FilterMode;
//! use dropfinder::Lookup;
//!
//! let dataset = Dataset::new(
//!     "classic",
//!     vec![Item::new("Fire Sword", "-1", "0")],
//!     vec![],
//!     vec![],
//!     vec![Npc::new("Blacksmith", "Prontera", "120,88")],
//! );
//!
//! let mut lookup = Lookup::default();
//! lookup.install(dataset);
//!
//! let hits = lookup.search_items("firesw", FilterMode::Linked)?.into_hits();
//! assert_eq!(hits[0].name, "Fire Sword");
//!
//! let refs = hits[0].row.npc_refs.clone();
//! let npcs = lookup.resolve_refs::<Npc>(&refs)?;
//! assert_eq!(npcs[0].1.name, "Blacksmith");
//! # Ok::<(), dropfinder::LookupError>(())
//! ```
//!
//! ## Behavior
//!
//! - An empty keyword lists the whole collection in row order and clears the
//!   result cache.
//! - A non-empty keyword is case-folded per character (never trimmed),
//!   served from the cache when possible, and otherwise answered by scanning
//!   the name index.
//! - Both paths return hits in row order.
//! - Relation fields that are `"-1"`, empty, malformed or out of range
//!   resolve to nothing rather than failing.

pub mod dataset;
pub mod error;
pub mod index;
pub mod lookup;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{LookupError, Result};
pub use lookup::{Lookup, LookupStats};
