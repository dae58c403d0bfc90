use crate::dataset::{Entity, RowIndex};
use crate::query::fold_str;
use rustc_hash::FxHashMap;

/// Inverted name index over one collection.
///
/// Maps each case-folded name to the rows carrying it. Names are folded one
/// character at a time, the same way search needles are. Keys iterate in the
/// order their first row was encountered, and rows under one key keep
/// collection order.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    /// Distinct folded names, first-occurrence order
    keys: Vec<String>,
    /// Rows per key, parallel to `keys`
    postings: Vec<Vec<RowIndex>>,
    /// Key -> slot in `keys`/`postings`
    slots: FxHashMap<String, usize>,
    /// Number of indexed rows
    rows: usize,
}

impl NameIndex {
    /// Build the index from scratch. Rows with an empty name are skipped.
    pub fn build<T: Entity>(collection: &[T]) -> Self {
        let mut index = Self::default();

        for (row, entity) in collection.iter().enumerate() {
            let name = entity.name();
            if name.is_empty() {
                continue;
            }
            index.insert(fold_str(name), row);
        }

        tracing::debug!(
            kind = %T::KIND,
            keys = index.keys.len(),
            rows = index.rows,
            "name index built"
        );

        index
    }

    fn insert(&mut self, key: String, row: RowIndex) {
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                self.keys.push(key.clone());
                self.postings.push(Vec::new());
                self.slots.insert(key, slot);
                slot
            }
        };
        self.postings[slot].push(row);
        self.rows += 1;
    }

    /// Full scan over keys, yielding the rows of every key the predicate
    /// accepts, in key order
    pub fn lookup<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = RowIndex> + 'a
    where
        P: FnMut(&str) -> bool + 'a,
    {
        self.keys
            .iter()
            .zip(&self.postings)
            .filter(move |(key, _)| predicate(key.as_str()))
            .flat_map(|(_, rows)| rows.iter().copied())
    }

    /// Rows whose name equals `name` after folding
    pub fn exact(&self, name: &str) -> &[RowIndex] {
        self.slots
            .get(&fold_str(name))
            .map(|&slot| self.postings[slot].as_slice())
            .unwrap_or(&[])
    }

    /// Keys in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of rows reachable through the index
    pub fn row_count(&self) -> usize {
        self.rows
    }
}
