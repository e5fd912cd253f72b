//! Dataset loader for the passenger CSV files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::schema::canonical_dtype;

/// Load a passenger CSV into memory and normalize its known columns.
///
/// # Arguments
/// * `path` - CSV file with a header row
/// * `infer_schema_length` - Rows used for schema inference (0 = full scan)
pub fn load_passengers(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let mut df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    normalize_schema(&mut df)
        .with_context(|| format!("Unexpected column types in {}", path.display()))?;

    Ok(df)
}

/// Cast every known passenger column present in `df` to its canonical dtype
pub fn normalize_schema(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for name in names {
        let Some(dtype) = canonical_dtype(&name) else {
            continue;
        };
        if df.column(&name)?.dtype() == &dtype {
            continue;
        }
        let casted = df
            .column(&name)?
            .cast(&dtype)
            .with_context(|| format!("Cannot cast column '{}' to {}", name, dtype))?;
        df.with_column(casted)?;
    }

    Ok(())
}

/// Shape and estimated memory of a loaded table
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}
