//! Reading dataset blobs from disk.
//!
//! This is the only place in the crate that touches the filesystem for data;
//! the lookup core itself works purely on what it is handed.

use crate::dataset::Dataset;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and decode a dataset blob. The version defaults to the file stem
/// when the blob does not carry one.
pub fn load_path(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;
    let mut dataset = Dataset::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;

    if dataset.version.is_empty()
        && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
    {
        dataset.version = stem.to_string();
    }

    tracing::debug!(
        path = %path.display(),
        items = dataset.items.len(),
        monsters = dataset.monsters.len(),
        maps = dataset.maps.len(),
        npcs = dataset.npcs.len(),
        "dataset loaded"
    );

    Ok(dataset)
}
