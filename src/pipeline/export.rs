//! CSV export of the cleaned tables

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::split::SplitTables;

pub const TRAIN_EXPORT_FILE: &str = "cleaned_train_data.csv";
pub const TEST_EXPORT_FILE: &str = "cleaned_test_data.csv";

/// Write a DataFrame as CSV with a header row and no index column
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}

/// Write both cleaned tables into `output_dir`, creating it when absent.
///
/// Returns the train and test file paths. Existing files are overwritten.
pub fn export_cleaned(tables: &mut SplitTables, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let train_path = output_dir.join(TRAIN_EXPORT_FILE);
    let test_path = output_dir.join(TEST_EXPORT_FILE);

    write_csv(&mut tables.train, &train_path)?;
    write_csv(&mut tables.test, &test_path)?;

    Ok((train_path, test_path))
}
