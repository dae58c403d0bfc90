//! Error types for the lookup core.
//!
//! Missing or malformed relations are not errors: they resolve to empty
//! results. Only calls that cannot be answered at all end up here.

use crate::dataset::EntityKind;
use thiserror::Error;

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Errors surfaced by [`crate::Lookup`] and the dataset loader.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A search or drill-down was attempted before any dataset was installed.
    #[error("no dataset installed yet")]
    Unready,

    /// Entity kind name did not match items, monsters, maps or npcs.
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// A row index handed in by the caller does not exist.
    #[error("{kind} row {index} out of range (collection has {len} rows)")]
    RowOutOfRange {
        kind: EntityKind,
        index: usize,
        len: usize,
    },

    /// The dataset blob could not be decoded.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset blob could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}
