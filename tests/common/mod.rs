//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small training manifest with the usual gaps:
/// - `Age` missing for passenger 3
/// - `Embarked` missing for passenger 4
/// - `Cabin` mostly missing
pub fn create_train_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5],
        "Survived" => [0i64, 1, 1, 1, 0],
        "Pclass" => [3i64, 1, 3, 1, 3],
        "Name" => ["Braund, Mr. Owen", "Cumings, Mrs. John", "Heikkinen, Miss. Laina", "Futrelle, Mrs. Jacques", "Allen, Mr. William"],
        "Sex" => ["male", "female", "female", "female", "male"],
        "Age" => [Some(22.0f64), Some(38.0), None, Some(35.0), Some(35.0)],
        "SibSp" => [1i64, 1, 0, 1, 0],
        "Parch" => [0i64, 0, 0, 0, 0],
        "Ticket" => ["A/5 21171", "PC 17599", "STON/O2. 3101282", "113803", "373450"],
        "Fare" => [7.25f64, 71.2833, 7.925, 53.1, 8.05],
        "Cabin" => [None, Some("C85"), None, Some("C123"), None],
        "Embarked" => [Some("S"), Some("C"), Some("S"), None, Some("S")],
    }
    .unwrap()
}

/// A matching test manifest (no outcome); `Fare` missing for passenger 893
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [892i64, 893, 894],
        "Pclass" => [3i64, 3, 2],
        "Name" => ["Kelly, Mr. James", "Wilkes, Mrs. James", "Myles, Mr. Thomas"],
        "Sex" => ["male", "female", "male"],
        "Age" => [Some(34.5f64), Some(47.0), None],
        "SibSp" => [0i64, 1, 0],
        "Parch" => [0i64, 0, 0],
        "Ticket" => ["330911", "363272", "240276"],
        "Fare" => [Some(7.8292f64), None, Some(9.6875)],
        "Cabin" => [None::<&str>, None, None],
        "Embarked" => ["Q", "S", "Q"],
    }
    .unwrap()
}

/// Two train rows and two test rows whose fill values differ depending on
/// whether statistics come from train alone or from both tables:
/// - Age observed [10, 30, 50] → combined median 30 (train-only would be 10)
/// - Fare observed [5, 15, 25] → combined median 15
/// - Embarked observed [S, Q, Q] → combined mode Q (train-only would be S)
pub fn create_leakage_fixture() -> (DataFrame, DataFrame) {
    let train = df! {
        "PassengerId" => [1i64, 2],
        "Survived" => [1i64, 0],
        "Pclass" => [1i64, 3],
        "Name" => ["A", "B"],
        "Sex" => ["female", "male"],
        "Age" => [Some(10.0f64), None],
        "SibSp" => [0i64, 0],
        "Parch" => [0i64, 1],
        "Ticket" => ["T1", "T2"],
        "Fare" => [Some(5.0f64), Some(15.0)],
        "Cabin" => [None::<&str>, None],
        "Embarked" => [Some("S"), None],
    }
    .unwrap();

    let test = df! {
        "PassengerId" => [3i64, 4],
        "Pclass" => [2i64, 2],
        "Name" => ["C", "D"],
        "Sex" => ["male", "female"],
        "Age" => [Some(30.0f64), Some(50.0)],
        "SibSp" => [1i64, 0],
        "Parch" => [0i64, 0],
        "Ticket" => ["T3", "T4"],
        "Fare" => [None, Some(25.0f64)],
        "Cabin" => [None::<&str>, Some("B5")],
        "Embarked" => [Some("Q"), Some("Q")],
    }
    .unwrap();

    (train, test)
}

/// Write a DataFrame as CSV into `dir`
pub fn write_csv(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// Temporary directory holding `train.csv` and `test.csv` fixtures
pub fn create_temp_inputs() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let train = write_csv(temp_dir.path(), "train.csv", &mut create_train_dataframe());
    let test = write_csv(temp_dir.path(), "test.csv", &mut create_test_dataframe());
    (temp_dir, train, test)
}

/// Column names of a DataFrame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Float values of a column (nulls preserved)
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

/// Integer values of a column (nulls preserved)
pub fn i64_values(df: &DataFrame, column: &str) -> Vec<Option<i64>> {
    df.column(column).unwrap().i64().unwrap().into_iter().collect()
}
