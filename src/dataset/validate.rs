//! Install-time validation and repair.
//!
//! Shape problems are fixed once here so the search and relation code can
//! trust every row it is handed.

use crate::dataset::types::{Entity, NO_RELATION, segments};
use crate::dataset::Dataset;
use serde::Serialize;

/// What validation found and repaired in one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Rows with an empty name (not indexed, still addressable by position)
    pub empty_names: usize,
    /// Relation or list fields rewritten to canonical form
    pub repaired_fields: usize,
    /// Numeric ids pointing past the end of their target collection
    pub dangling_refs: usize,
    /// Segments that are not a non-negative integer
    pub malformed_refs: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.repaired_fields == 0 && self.dangling_refs == 0 && self.malformed_refs == 0
    }
}

/// Validate and repair every collection of `dataset` in place
pub fn validate(dataset: &mut Dataset) -> ValidationReport {
    let mut report = ValidationReport::default();
    let lens = [
        dataset.items.len(),
        dataset.monsters.len(),
        dataset.maps.len(),
        dataset.npcs.len(),
    ];

    validate_rows(&mut dataset.items, &lens, &mut report);
    validate_rows(&mut dataset.monsters, &lens, &mut report);
    validate_rows(&mut dataset.maps, &lens, &mut report);
    validate_rows(&mut dataset.npcs, &lens, &mut report);

    if !report.is_clean() {
        tracing::warn!(
            repaired = report.repaired_fields,
            dangling = report.dangling_refs,
            malformed = report.malformed_refs,
            "dataset {:?} needed repair",
            dataset.version
        );
    }

    report
}

fn validate_rows<T: Entity>(rows: &mut [T], lens: &[usize; 4], report: &mut ValidationReport) {
    for (row_index, row) in rows.iter_mut().enumerate() {
        if row.name().is_empty() {
            report.empty_names += 1;
        }

        for field in row.relations_mut() {
            if let Some(canonical) = canonical_list(field.refs) {
                tracing::debug!(
                    kind = %T::KIND,
                    row = row_index,
                    field = field.name,
                    "relation {:?} rewritten as {:?}",
                    field.refs,
                    canonical
                );
                *field.refs = canonical;
                report.repaired_fields += 1;
            }

            let bound = lens[field.target.slot()];
            for segment in segments(field.refs) {
                match segment.parse::<usize>() {
                    Ok(id) if id < bound => {}
                    Ok(_) => report.dangling_refs += 1,
                    Err(_) => report.malformed_refs += 1,
                }
            }
        }

        for list in row.text_lists_mut() {
            if let Some(canonical) = canonical_list(list) {
                *list = canonical;
                report.repaired_fields += 1;
            }
        }
    }
}

/// Canonical spelling of a comma list, or `None` when already canonical.
///
/// Canonical means: exactly the sentinel, or trimmed non-empty segments
/// joined by single commas.
fn canonical_list(field: &str) -> Option<String> {
    let parts: Vec<&str> = segments(field).collect();
    let canonical = if parts.is_empty() {
        NO_RELATION.to_string()
    } else {
        parts.join(",")
    };
    (canonical != field).then_some(canonical)
}
