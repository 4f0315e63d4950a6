use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};

use crate::migrate::{Dataset, LegacyDataset};

/// Read a legacy (v1) dataset from a JSON file at `path`.
pub fn read_legacy_json(path: &Path) -> Result<LegacyDataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read legacy dataset: {}", path.display()))?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a converted dataset to a JSON file at `path`.
pub fn write_dataset_json(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, dataset)?;
    Ok(())
}
