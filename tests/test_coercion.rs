//! Ordinal coercion tests: rank mapping, locale variants, fallback mode

use riskscope::pipeline::{coerce_ordinal, fallback_codes};
use riskscope::schema::OrdinalField;

mod common;

#[test]
fn test_english_vocabulary() {
    let values = [Some("Low"), Some("Middle"), Some("High")];
    let coerced = coerce_ordinal(&values, OrdinalField::IncomeLevel);

    assert!(!coerced.fallback);
    assert_eq!(coerced.values, vec![Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn test_portuguese_vocabulary() {
    let values = [Some("Baixa"), Some("Média"), Some("Alta")];
    let coerced = coerce_ordinal(&values, OrdinalField::IncomeLevel);

    assert!(!coerced.fallback);
    assert_eq!(coerced.values, vec![Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn test_coercion_is_monotonic() {
    // If label A ranks below label B, coerced(A) < coerced(B).
    let pairs = [
        (OrdinalField::EducationLevel, "Primary", "Tertiary"),
        (OrdinalField::EducationLevel, "Fundamental", "Superior"),
        (OrdinalField::AirPollution, "Low", "Moderate"),
        (OrdinalField::DietQuality, "Ruim", "Boa"),
        (OrdinalField::PhysicalActivity, "Moderado", "Alto"),
    ];

    for (field, lower, higher) in pairs {
        let coerced = coerce_ordinal(&[Some(lower), Some(higher)], field);
        assert!(!coerced.fallback);
        assert!(
            coerced.values[0].unwrap() < coerced.values[1].unwrap(),
            "{:?}: {} should rank below {}",
            field,
            lower,
            higher
        );
    }
}

#[test]
fn test_partial_unknown_maps_to_null_without_fallback() {
    let values = [Some("Low"), Some("Enormous"), Some("High"), None];
    let coerced = coerce_ordinal(&values, OrdinalField::IncomeLevel);

    assert!(!coerced.fallback);
    assert_eq!(
        coerced.values,
        vec![Some(1.0), None, Some(3.0), None]
    );
}

#[test]
fn test_entirely_unknown_vocabulary_falls_back_flagged() {
    let values = [Some("Tier-2"), Some("Tier-1"), Some("Tier-2"), Some("Tier-3")];
    let coerced = coerce_ordinal(&values, OrdinalField::IncomeLevel);

    // First-occurrence order, not semantic order, and the flag says so.
    assert!(coerced.fallback);
    assert_eq!(
        coerced.values,
        vec![Some(0.0), Some(1.0), Some(0.0), Some(2.0)]
    );
}

#[test]
fn test_fallback_codes_are_stable_across_calls() {
    let values = [Some("b"), Some("a"), Some("c"), Some("a")];
    let first = fallback_codes(&values);
    let second = fallback_codes(&values);
    assert_eq!(first, second);
}

#[test]
fn test_fallback_never_throws_on_empty() {
    let coerced = coerce_ordinal(&[], OrdinalField::DietQuality);
    assert!(coerced.values.is_empty());
    assert!(!coerced.fallback);
}
