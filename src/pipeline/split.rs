//! Partition the combined table back into train and test by origin flag

use anyhow::{Context, Result};
use polars::prelude::*;

use super::schema::{SURVIVED, TRAIN_SET};
use super::PrepError;

/// Cleaned train and test tables
#[derive(Debug, Clone)]
pub struct SplitTables {
    pub train: DataFrame,
    pub test: DataFrame,
}

/// Split on `TrainSet`, drop the flag, and drop `Survived` from the test rows.
///
/// Training outcomes are cast to Int64; a null outcome in a training row is
/// a [`PrepError::NullOutcome`].
pub fn split_by_origin(combined: &DataFrame) -> Result<SplitTables> {
    let mask = combined
        .column(TRAIN_SET)
        .context("Combined table has no origin flag")?
        .bool()?
        .clone();

    let mut train = combined.filter(&mask)?.drop(TRAIN_SET)?;
    let test = combined.filter(&!&mask)?.drop(TRAIN_SET)?.drop(SURVIVED)?;

    let outcome = train.column(SURVIVED)?;
    if outcome.null_count() > 0 {
        return Err(PrepError::NullOutcome {
            rows: outcome.null_count(),
        }
        .into());
    }
    let outcome = outcome.cast(&DataType::Int64)?;
    train.with_column(outcome)?;

    Ok(SplitTables { train, test })
}
