//! Correlation engine tests: ranking, skip reasons, symmetry, scenarios B/C

use polars::prelude::*;
use riskscope::pipeline::{pearson, rank_risk_factors, SkipReason};

mod common;

#[test]
fn test_scenario_b_manual_reference_value() {
    // Income ["Low","Low","High"] coerces to [1,1,3]; outcome [0,1,1].
    // Hand-computed Pearson: r = 0.5.
    let df = df! {
        "income_level" => ["Low", "Low", "High"],
        "cancer_stage" => ["No Cancer", "Stage I", "Stage II"],
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["income_level"]).unwrap();
    assert_eq!(ranking.factors.len(), 1);

    let factor = &ranking.factors[0];
    assert!(!factor.ordinal_fallback);
    assert!(
        (factor.correlation - 0.5).abs() < 1e-9,
        "expected r = 0.5, got {}",
        factor.correlation
    );
    assert!((factor.magnitude - 0.5).abs() < 1e-9);
}

#[test]
fn test_scenario_c_insufficient_data_is_skipped_not_thrown() {
    // One usable row for the factor: skipped with InsufficientData, absent
    // from the ranking, and the pipeline does not throw.
    let df = df! {
        "years_smoking" => [Some(12.0f64), None, None],
        "cancer_stage" => ["No Cancer", "Stage I", "Stage II"],
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["years_smoking"]).unwrap();

    assert!(ranking.factors.is_empty());
    assert_eq!(ranking.skipped.len(), 1);
    assert_eq!(ranking.skipped[0].field, "years_smoking");
    assert_eq!(ranking.skipped[0].reason, SkipReason::InsufficientData);
}

#[test]
fn test_degenerate_field_never_appears_in_ranking() {
    // A field with a single unique value in the view is excluded.
    let df = df! {
        "bmi" => [25.0f64, 25.0, 25.0, 25.0],
        "age" => [30.0f64, 40.0, 50.0, 60.0],
        "cancer_stage" => ["No Cancer", "No Cancer", "Stage I", "Stage II"],
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["bmi", "age"]).unwrap();

    assert!(ranking.factors.iter().all(|f| f.field != "bmi"));
    let skipped = ranking
        .skipped
        .iter()
        .find(|s| s.field == "bmi")
        .expect("constant field must be skipped");
    assert_eq!(skipped.reason, SkipReason::ZeroVariance);
}

#[test]
fn test_constant_outcome_skips_every_factor() {
    let df = df! {
        "age" => [30.0f64, 40.0, 50.0],
        "bmi" => [20.0f64, 25.0, 30.0],
        "cancer_stage" => ["No Cancer", "No Cancer", "No Cancer"],
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["age", "bmi"]).unwrap();
    assert!(ranking.factors.is_empty());
    assert_eq!(ranking.skipped.len(), 2);
    assert!(ranking
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::ZeroVariance));
}

#[test]
fn test_ranking_is_ascending_by_magnitude() {
    let base = common::bound_en();
    let ranking = rank_risk_factors(
        &base,
        &["age", "years_smoking", "cigarettes_per_day", "bmi", "air_pollution"],
    )
    .unwrap();

    assert!(ranking.factors.len() >= 2, "fixture should rank several factors");
    for pair in ranking.factors.windows(2) {
        assert!(
            pair[0].magnitude <= pair[1].magnitude,
            "ranking must ascend: {} ({}) before {} ({})",
            pair[0].field,
            pair[0].magnitude,
            pair[1].field,
            pair[1].magnitude
        );
    }
}

#[test]
fn test_ordinal_factor_joins_numeric_ranking() {
    let base = common::bound_en();
    let ranking = rank_risk_factors(&base, &["income_level"]).unwrap();

    let factor = ranking
        .factors
        .iter()
        .find(|f| f.field == "income_level")
        .expect("ordinal factor should rank");
    assert!(!factor.ordinal_fallback);
}

#[test]
fn test_unknown_vocabulary_factor_is_flagged() {
    let df = df! {
        "income_level" => ["Bronze", "Silver", "Gold", "Bronze"],
        "cancer_stage" => ["No Cancer", "No Cancer", "Stage I", "Stage II"],
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["income_level"]).unwrap();
    if let Some(factor) = ranking.factors.first() {
        assert!(factor.ordinal_fallback);
        assert_eq!(ranking.fallback_fields(), vec!["income_level"]);
    } else {
        panic!("fallback-coded factor should still rank: {:?}", ranking.skipped);
    }
}

#[test]
fn test_empty_view_ranks_nothing() {
    let df = df! {
        "age" => Vec::<f64>::new(),
        "cancer_stage" => Vec::<String>::new(),
    }
    .unwrap();

    let ranking = rank_risk_factors(&df, &["age"]).unwrap();
    assert!(ranking.factors.is_empty());
    assert_eq!(ranking.skipped[0].reason, SkipReason::InsufficientData);
}

#[test]
fn test_correlation_symmetry() {
    let xs = [34.0, 45.0, 52.0, 61.0, 48.0, 70.0];
    let ys = [0.0, 0.0, 1.0, 1.0, 0.0, 1.0];

    let xy = pearson(&xs, &ys).unwrap();
    let yx = pearson(&ys, &xs).unwrap();
    assert!((xy - yx).abs() < 1e-12);
}

#[test]
fn test_missing_candidate_column_is_an_error() {
    let df = df! {
        "age" => [30.0f64, 40.0],
        "cancer_stage" => ["No Cancer", "Stage I"],
    }
    .unwrap();

    assert!(rank_risk_factors(&df, &["no_such_column"]).is_err());
}
