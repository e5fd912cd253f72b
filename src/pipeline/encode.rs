//! Categorical encoding: binary mapping and drop-first one-hot indicators

use std::collections::BTreeSet;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::schema::{EMBARKED, SEX};
use super::PrepError;

/// Codes for the binary `Sex` field
pub const SEX_CODES: [(&str, i64); 2] = [("male", 0), ("female", 1)];

/// Summary of the encoding stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodingReport {
    /// Column mapped to {0, 1}
    pub binary_column: String,
    /// Non-null values that matched no code and became null
    pub unmapped: usize,
    /// Column replaced by indicator columns
    pub one_hot_column: String,
    /// Level dropped as the reference category
    pub dropped_level: Option<String>,
    /// Indicator columns appended to the table
    pub indicator_columns: Vec<String>,
}

/// Replace a string column with integer codes. Values without a code become null.
///
/// Returns the number of non-null values that had no code.
pub fn map_binary(df: &mut DataFrame, column: &str, codes: &[(&str, i64)]) -> Result<usize> {
    let col = df.column(column)?;
    let values = col.str().map_err(|_| PrepError::UnexpectedType {
        column: column.to_string(),
        expected: "str",
        found: col.dtype().to_string(),
    })?;

    let mut unmapped = 0usize;
    let encoded: Int64Chunked = values
        .into_iter()
        .map(|v| {
            let v = v?;
            let code = codes.iter().find(|(label, _)| *label == v).map(|(_, c)| *c);
            if code.is_none() {
                unmapped += 1;
            }
            code
        })
        .collect();

    df.with_column(encoded.with_name(column.into()))?;
    Ok(unmapped)
}

/// One-hot encode `column`, dropping the first sorted level.
///
/// Indicator columns are named `<column>_<level>`, hold Int32 0/1, and are
/// appended after the existing columns. Null cells get 0 in every indicator.
/// Returns the dropped level (if any level existed) and the new column names.
pub fn one_hot_drop_first(
    df: &DataFrame,
    column: &str,
) -> Result<(DataFrame, Option<String>, Vec<String>)> {
    let col = df.column(column)?;
    let values = col.str().map_err(|_| PrepError::UnexpectedType {
        column: column.to_string(),
        expected: "str",
        found: col.dtype().to_string(),
    })?;

    let levels: BTreeSet<&str> = values.into_iter().flatten().collect();
    let mut levels = levels.into_iter();
    let dropped_level = levels.next().map(str::to_string);

    let mut indicators: Vec<Column> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for level in levels {
        let name = format!("{}_{}", column, level);
        let indicator: Int32Chunked = values
            .into_iter()
            .map(|v| Some(i32::from(v == Some(level))))
            .collect();
        indicators.push(indicator.with_name(name.as_str().into()).into_column());
        names.push(name);
    }

    let mut encoded = df.drop(column)?;
    for indicator in indicators {
        encoded.with_column(indicator)?;
    }

    Ok((encoded, dropped_level, names))
}

/// Encode `Sex` as 0/1 and expand `Embarked` into indicator columns
pub fn encode_passengers(df: &DataFrame) -> Result<(DataFrame, EncodingReport)> {
    let mut df = df.clone();
    let unmapped = map_binary(&mut df, SEX, &SEX_CODES)?;
    let (df, dropped_level, indicator_columns) = one_hot_drop_first(&df, EMBARKED)?;

    let report = EncodingReport {
        binary_column: SEX.to_string(),
        unmapped,
        one_hot_column: EMBARKED.to_string(),
        dropped_level,
        indicator_columns,
    };

    Ok((df, report))
}
