//! Combine the train and test tables into one frame tagged by origin

use anyhow::{Context, Result};
use polars::prelude::*;

use super::schema::{has_column, SURVIVED, TRAIN_SET};

/// Stack `train` on top of `test` with a `TrainSet` origin flag.
///
/// The test table receives a null `Survived` column and is reordered to the
/// train table's column order so the frames stack vertically. Row order is
/// always train rows first, then test rows.
pub fn merge_train_test(train: &DataFrame, test: &DataFrame) -> Result<DataFrame> {
    let mut train = train.clone();
    let train_flags = vec![true; train.height()];
    train.with_column(Column::new(TRAIN_SET.into(), train_flags))?;

    let mut test = test.clone();
    let test_flags = vec![false; test.height()];
    test.with_column(Column::new(TRAIN_SET.into(), test_flags))?;
    if !has_column(&test, SURVIVED) {
        test.with_column(Series::full_null(
            SURVIVED.into(),
            test.height(),
            &DataType::Int64,
        ))?;
    }

    let order: Vec<String> = train
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let test = test
        .select(order.iter().map(String::as_str))
        .context("Test table does not carry the training columns")?;

    let combined = train
        .vstack(&test)
        .context("Train and test tables have incompatible column types")?;

    Ok(combined)
}
