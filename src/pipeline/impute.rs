//! Missing value imputation and column pruning for the combined table

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::schema::{AGE, DROPPED_COLUMNS, EMBARKED, FARE};
use super::PrepError;

/// Statistic used to fill a column's nulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FillStrategy {
    /// Middle observed value (mean of the two middle values for even counts)
    Median,
    /// Most common observed value, smallest value on ties
    MostFrequent,
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::Median => write!(f, "median"),
            FillStrategy::MostFrequent => write!(f, "mode"),
        }
    }
}

/// The value written into null cells
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FillValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillValue::Number(v) => write!(f, "{}", v),
            FillValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// What one fill did to one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillReport {
    pub column: String,
    pub strategy: FillStrategy,
    pub value: FillValue,
    /// Number of null cells that were filled
    pub filled: usize,
}

/// Columns filled by the cleaner, in the order they are processed
pub const FILL_PLAN: [(&str, FillStrategy); 3] = [
    (EMBARKED, FillStrategy::MostFrequent),
    (FARE, FillStrategy::Median),
    (AGE, FillStrategy::Median),
];

/// Median of a slice of observed values, `None` when empty
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent value; ties go to the lexicographically smallest
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(v, _)| v.to_string())
}

/// Median of the non-null values of a numeric column
pub fn column_median(df: &DataFrame, column: &str) -> Result<f64> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    let mut observed: Vec<f64> = values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    median(&mut observed).ok_or_else(|| {
        PrepError::NoObservedValues {
            column: column.to_string(),
            statistic: "median",
        }
        .into()
    })
}

/// Mode of the non-null values of a string column
pub fn column_mode(df: &DataFrame, column: &str) -> Result<String> {
    let values = string_values(df, column)?;
    mode(values.into_iter().flatten()).ok_or_else(|| {
        PrepError::NoObservedValues {
            column: column.to_string(),
            statistic: "mode",
        }
        .into()
    })
}

fn string_values<'a>(df: &'a DataFrame, column: &str) -> Result<&'a StringChunked> {
    let col = df.column(column)?;
    col.str().map_err(|_| {
        PrepError::UnexpectedType {
            column: column.to_string(),
            expected: "str",
            found: col.dtype().to_string(),
        }
        .into()
    })
}

/// Replace the nulls of `column` using `strategy`, computed over all rows of `df`
pub fn fill_missing(df: &mut DataFrame, column: &str, strategy: FillStrategy) -> Result<FillReport> {
    let filled = df.column(column)?.null_count();

    let value = match strategy {
        FillStrategy::Median => {
            let value = column_median(df, column)?;
            let values = df.column(column)?.cast(&DataType::Float64)?;
            let replaced: Float64Chunked = values
                .f64()?
                .into_iter()
                .map(|v| Some(v.unwrap_or(value)))
                .collect();
            df.with_column(replaced.with_name(column.into()))?;
            FillValue::Number(value)
        }
        FillStrategy::MostFrequent => {
            let value = column_mode(df, column)?;
            let replaced: StringChunked = string_values(df, column)?
                .into_iter()
                .map(|v| Some(v.unwrap_or(value.as_str())))
                .collect();
            df.with_column(replaced.with_name(column.into()))?;
            FillValue::Text(value)
        }
    };

    Ok(FillReport {
        column: column.to_string(),
        strategy,
        value,
        filled,
    })
}

/// Apply [`FILL_PLAN`] to the combined table.
///
/// Statistics come from train and test rows together, not from the
/// training rows alone.
pub fn impute_passengers(df: &mut DataFrame) -> Result<Vec<FillReport>> {
    FILL_PLAN
        .iter()
        .map(|(column, strategy)| fill_missing(df, column, *strategy))
        .collect()
}

/// Drop the free-text and sparse columns the analysis does not use
pub fn drop_unused_columns(df: &DataFrame) -> DataFrame {
    df.drop_many(DROPPED_COLUMNS)
}
