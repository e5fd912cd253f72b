//! Integration tests for the full preparation pipeline

use tempfile::TempDir;
use titanic_prep::pipeline::schema::{AGE, FARE, SURVIVED};
use titanic_prep::pipeline::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_full_pipeline_from_csv() {
    let (_temp_dir, train_path, test_path) = create_temp_inputs();

    let train = load_passengers(&train_path, 100).unwrap();
    let test = load_passengers(&test_path, 100).unwrap();
    let prepared = prepare_passengers(&train, &test).unwrap();

    let tables = &prepared.tables;
    assert_eq!(
        tables.train.height() + tables.test.height(),
        train.height() + test.height(),
        "Cleaning must not add or remove rows"
    );
    assert_shape(&tables.train, 5, 10);
    assert_shape(&tables.test, 3, 9);

    for df in [&tables.train, &tables.test] {
        for column in [AGE, FARE, "Embarked_Q", "Embarked_S"] {
            assert_eq!(df.column(column).unwrap().null_count(), 0, "{} has nulls", column);
        }
    }
    assert_missing_columns(&tables.test, &[SURVIVED]);
}

#[test]
fn test_leakage_fixture_uses_combined_statistics() {
    let (train, test) = create_leakage_fixture();

    let prepared = prepare_passengers(&train, &test).unwrap();
    let tables = &prepared.tables;

    // Age: train row 2 filled with the combined median of [10, 30, 50]
    assert_eq!(f64_values(&tables.train, AGE), vec![Some(10.0), Some(30.0)]);
    // Fare: test row 1 filled with the combined median of [5, 15, 25]
    assert_eq!(f64_values(&tables.test, FARE), vec![Some(15.0), Some(25.0)]);

    // Embarked: combined mode is Q; levels [Q, S] drop Q, leaving Embarked_S
    assert_eq!(prepared.fills[0].value, FillValue::Text("Q".to_string()));
    assert_eq!(prepared.encoding.indicator_columns, vec!["Embarked_S"]);
    let embarked_s: Vec<Option<i32>> = tables
        .train
        .column("Embarked_S")
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(embarked_s, vec![Some(1), Some(0)]);
}

#[test]
fn test_export_writes_header_without_index() {
    let (train, test) = create_leakage_fixture();
    let mut prepared = prepare_passengers(&train, &test).unwrap();
    let out_dir = TempDir::new().unwrap();
    let nested = out_dir.path().join("outputs");

    let (train_path, test_path) = export_cleaned(&mut prepared.tables, &nested).unwrap();

    assert!(train_path.ends_with(TRAIN_EXPORT_FILE));
    assert!(test_path.ends_with(TEST_EXPORT_FILE));

    let train_csv = std::fs::read_to_string(&train_path).unwrap();
    let mut lines = train_csv.lines();
    assert_eq!(
        lines.next(),
        Some("PassengerId,Survived,Pclass,Sex,Age,SibSp,Parch,Fare,Embarked_S")
    );
    assert_eq!(train_csv.lines().count(), 3);

    let test_csv = std::fs::read_to_string(&test_path).unwrap();
    assert!(test_csv.starts_with("PassengerId,Pclass,Sex,Age,SibSp,Parch,Fare,Embarked_S"));
}

#[test]
fn test_exported_train_outcome_is_integer() {
    let (train, test) = create_leakage_fixture();
    let mut prepared = prepare_passengers(&train, &test).unwrap();
    let out_dir = TempDir::new().unwrap();

    let (train_path, _) = export_cleaned(&mut prepared.tables, out_dir.path()).unwrap();

    let reloaded = load_passengers(&train_path, 100).unwrap();
    assert_eq!(i64_values(&reloaded, SURVIVED), vec![Some(1), Some(0)]);
}

#[test]
fn test_rerun_produces_identical_csv_bytes() {
    let (_temp_dir, train_path, test_path) = create_temp_inputs();

    let run = |out: &std::path::Path| {
        let train = load_passengers(&train_path, 100).unwrap();
        let test = load_passengers(&test_path, 100).unwrap();
        let mut prepared = prepare_passengers(&train, &test).unwrap();
        export_cleaned(&mut prepared.tables, out).unwrap()
    };

    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let (train_a, test_a) = run(first_dir.path());
    let (train_b, test_b) = run(second_dir.path());

    assert_eq!(std::fs::read(train_a).unwrap(), std::fs::read(train_b).unwrap());
    assert_eq!(std::fs::read(test_a).unwrap(), std::fs::read(test_b).unwrap());
}

#[test]
fn test_export_overwrites_existing_files() {
    let (train, test) = create_leakage_fixture();
    let out_dir = TempDir::new().unwrap();
    std::fs::write(out_dir.path().join(TRAIN_EXPORT_FILE), "stale").unwrap();

    let mut prepared = prepare_passengers(&train, &test).unwrap();
    let (train_path, _) = export_cleaned(&mut prepared.tables, out_dir.path()).unwrap();

    let contents = std::fs::read_to_string(train_path).unwrap();
    assert!(contents.starts_with("PassengerId"));
}
