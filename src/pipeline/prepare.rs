//! End-to-end data preparation without file output

use anyhow::Result;
use polars::prelude::*;

use super::encode::{encode_passengers, EncodingReport};
use super::impute::{drop_unused_columns, impute_passengers, FillReport};
use super::merge::merge_train_test;
use super::schema::{require_columns, PASSENGER_COLUMNS, SURVIVED};
use super::split::{split_by_origin, SplitTables};

/// Everything the data stages produce
#[derive(Debug, Clone)]
pub struct Preparation {
    pub tables: SplitTables,
    pub fills: Vec<FillReport>,
    pub encoding: EncodingReport,
}

/// Fail unless both inputs carry the passenger columns (and train its outcome)
pub fn validate_inputs(train: &DataFrame, test: &DataFrame) -> Result<()> {
    require_columns(train, &PASSENGER_COLUMNS, "train")?;
    require_columns(train, &[SURVIVED], "train")?;
    require_columns(test, &PASSENGER_COLUMNS, "test")?;
    Ok(())
}

/// Merge, clean, encode and split the two loaded tables
pub fn prepare_passengers(train: &DataFrame, test: &DataFrame) -> Result<Preparation> {
    validate_inputs(train, test)?;

    let mut combined = merge_train_test(train, test)?;
    let fills = impute_passengers(&mut combined)?;
    let combined = drop_unused_columns(&combined);
    let (combined, encoding) = encode_passengers(&combined)?;
    let tables = split_by_origin(&combined)?;

    Ok(Preparation {
        tables,
        fills,
        encoding,
    })
}
