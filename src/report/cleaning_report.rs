//! JSON export of what a cleaning run did

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{EncodingReport, FillReport};

pub const REPORT_FILE: &str = "cleaning_report.json";

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// titanic-prep version
    pub version: String,
    pub train_file: String,
    pub test_file: String,
}

/// Row counts before and after cleaning
#[derive(Debug, Serialize)]
pub struct RowCounts {
    pub train_in: usize,
    pub test_in: usize,
    pub train_out: usize,
    pub test_out: usize,
}

/// Files written by the run
#[derive(Debug, Serialize)]
pub struct OutputFiles {
    pub csv: Vec<String>,
    pub images: Vec<String>,
}

/// Complete cleaning report
#[derive(Debug, Serialize)]
pub struct CleaningReport {
    pub metadata: RunMetadata,
    pub rows: RowCounts,
    pub fills: Vec<FillReport>,
    pub dropped_columns: Vec<String>,
    pub encoding: EncodingReport,
    pub outputs: OutputFiles,
}

impl CleaningReport {
    pub fn new(
        train_file: &Path,
        test_file: &Path,
        rows: RowCounts,
        fills: Vec<FillReport>,
        dropped_columns: &[&str],
        encoding: EncodingReport,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                train_file: train_file.display().to_string(),
                test_file: test_file.display().to_string(),
            },
            rows,
            fills,
            dropped_columns: dropped_columns.iter().map(|c| c.to_string()).collect(),
            encoding,
            outputs: OutputFiles {
                csv: Vec::new(),
                images: Vec::new(),
            },
        }
    }

    pub fn with_outputs(mut self, csv: &[PathBuf], images: &[PathBuf]) -> Self {
        self.outputs.csv = csv.iter().map(|p| p.display().to_string()).collect();
        self.outputs.images = images.iter().map(|p| p.display().to_string()).collect();
        self
    }
}

/// Write the report as pretty JSON into `output_dir` and return its path
pub fn export_cleaning_report(report: &CleaningReport, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(REPORT_FILE);
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize cleaning report")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    Ok(path)
}
