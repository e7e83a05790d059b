//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::schema;

/// Load a raw dataset from a file (CSV or Parquet based on extension).
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Load a dataset and bind it to the canonical schema.
///
/// Variant detection and required-column validation happen here, at load
/// time; a missing required column aborts before any analysis runs. Returns
/// the canonical DataFrame and the name of the detected variant.
pub fn load_bound_dataset(path: &Path) -> Result<(DataFrame, &'static str)> {
    let df = load_dataset(path)?;
    schema::detect_and_bind(df)
        .with_context(|| format!("Dataset failed schema validation: {}", path.display()))
}
