//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// titanic-prep - Clean, encode and chart the Titanic passenger dataset
#[derive(Parser, Debug)]
#[command(name = "titanic-prep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training CSV (must include the Survived column)
    #[arg(long, default_value = "datasets/train.csv")]
    pub train: PathBuf,

    /// Test CSV (same columns as the training file, without Survived)
    #[arg(long, default_value = "datasets/test.csv")]
    pub test: PathBuf,

    /// Directory for chart images, created if absent
    #[arg(long, default_value = "images")]
    pub images_dir: PathBuf,

    /// Directory for cleaned CSV exports, created if absent
    #[arg(long, default_value = "outputs")]
    pub outputs_dir: PathBuf,

    /// Skip rendering the seven charts
    #[arg(long, default_value = "false")]
    pub no_charts: bool,

    /// Also write cleaning_report.json into the outputs directory
    #[arg(long, default_value = "false")]
    pub report: bool,

    /// Number of rows to use for CSV schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}
