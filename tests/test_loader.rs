//! Loader tests: file formats and load-time schema binding

use riskscope::pipeline::{load_bound_dataset, load_dataset};

mod common;

#[test]
fn test_load_csv_round_trip() {
    let cohort = common::cohort_en();
    let (_guard, path) = common::write_temp_csv(&cohort);

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded.height(), cohort.height());
    assert_eq!(loaded.width(), cohort.width());
}

#[test]
fn test_load_bound_detects_english_variant() {
    let (_guard, path) = common::write_temp_csv(&common::cohort_en());

    let (df, variant) = load_bound_dataset(&path).unwrap();
    assert_eq!(variant, "english");
    assert!(df.column("age").is_ok());
    assert!(df.column("cancer_stage").is_ok());
}

#[test]
fn test_load_bound_detects_portuguese_variant() {
    let (_guard, path) = common::write_temp_csv(&common::cohort_pt());

    let (df, variant) = load_bound_dataset(&path).unwrap();
    assert_eq!(variant, "portuguese");
    assert!(df.column("smoking_status").is_ok());
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cohort.xlsx");
    std::fs::write(&path, b"not a table").unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = load_dataset(std::path::Path::new("/nonexistent/cohort.csv")).unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_unrecognized_schema_fails_at_load_time() {
    let df = polars::prelude::df! {
        "foo" => [1i64, 2],
        "bar" => ["a", "b"],
    }
    .unwrap();
    let (_guard, path) = common::write_temp_csv(&df);

    let err = load_bound_dataset(&path).unwrap_err();
    assert!(err.to_string().contains("schema validation"));
}
