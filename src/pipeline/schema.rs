//! Passenger record schema: column names, canonical dtypes, presence checks

use anyhow::Result;
use polars::prelude::*;

use super::PrepError;

pub const PASSENGER_ID: &str = "PassengerId";
pub const SURVIVED: &str = "Survived";
pub const PCLASS: &str = "Pclass";
pub const NAME: &str = "Name";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";
pub const TICKET: &str = "Ticket";
pub const FARE: &str = "Fare";
pub const CABIN: &str = "Cabin";
pub const EMBARKED: &str = "Embarked";

/// Origin flag added when train and test are combined
pub const TRAIN_SET: &str = "TrainSet";

/// Columns both input files must carry
pub const PASSENGER_COLUMNS: [&str; 11] = [
    PASSENGER_ID,
    PCLASS,
    NAME,
    SEX,
    AGE,
    SIBSP,
    PARCH,
    TICKET,
    FARE,
    CABIN,
    EMBARKED,
];

/// Columns removed entirely by the cleaner
pub const DROPPED_COLUMNS: [&str; 3] = [CABIN, TICKET, NAME];

/// Canonical dtype for a known passenger column.
///
/// CSV inference can disagree between files (an all-integer `Age` in one,
/// floats in the other), so every known column is cast to this type after
/// loading and before train and test are stacked.
pub fn canonical_dtype(column: &str) -> Option<DataType> {
    match column {
        PASSENGER_ID | SURVIVED | PCLASS | SIBSP | PARCH => Some(DataType::Int64),
        AGE | FARE => Some(DataType::Float64),
        NAME | SEX | TICKET | CABIN | EMBARKED => Some(DataType::String),
        _ => None,
    }
}

/// Fail with [`PrepError::MissingColumn`] for the first required column absent from `df`
pub fn require_columns(df: &DataFrame, required: &[&str], table: &str) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in required {
        if !present.iter().any(|p| p == column) {
            return Err(PrepError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            }
            .into());
        }
    }

    Ok(())
}

/// Whether `df` has a column named `column`
pub fn has_column(df: &DataFrame, column: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == column)
}
