//! Cascading predicate filters over the base record set
//!
//! Predicates conjoin: each one is applied to the view produced by the
//! previous one, so the row count can only shrink. The base DataFrame is
//! never mutated; every application allocates a fresh view. Caller
//! convention: global demographic filters (age range, sex, region, smoking
//! status) come before page-specific refinements (BMI range, income set,
//! education set) - the final row set is order-independent either way.

use polars::prelude::*;

use super::error::PipelineError;

/// One conjunctive filter constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Inclusive numeric range `[lo, hi]` on a field.
    Range { field: String, lo: f64, hi: f64 },
    /// Equality against one value (compared as strings for categorical
    /// columns; non-string columns are stringified).
    Equals { field: String, value: String },
    /// Membership in a set of values.
    In { field: String, values: Vec<String> },
}

impl Predicate {
    pub fn range(field: &str, lo: f64, hi: f64) -> Self {
        Predicate::Range {
            field: field.to_string(),
            lo,
            hi,
        }
    }

    pub fn equals(field: &str, value: &str) -> Self {
        Predicate::Equals {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn in_set(field: &str, values: &[&str]) -> Self {
        Predicate::In {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Predicate::Range { field, .. } => field,
            Predicate::Equals { field, .. } => field,
            Predicate::In { field, .. } => field,
        }
    }
}

/// Build the boolean row mask for one predicate.
///
/// Rows with a null field value never match. Also used by the aggregation
/// engine to evaluate rate predicates.
pub fn predicate_mask(df: &DataFrame, predicate: &Predicate) -> Result<BooleanChunked, PipelineError> {
    let column = df
        .column(predicate.field())
        .map_err(|_| PipelineError::MissingColumn {
            column: predicate.field().to_string(),
        })?;

    let mask: Vec<bool> = match predicate {
        Predicate::Range { field, lo, hi } => {
            if lo > hi {
                return Err(PipelineError::InvalidFilterRange {
                    field: field.clone(),
                    lo: *lo,
                    hi: *hi,
                });
            }
            let ca = column.cast(&DataType::Float64)?;
            ca.f64()?
                .iter()
                .map(|v| v.is_some_and(|x| x >= *lo && x <= *hi))
                .collect()
        }
        Predicate::Equals { value, .. } => {
            let ca = column.cast(&DataType::String)?;
            ca.str()?
                .iter()
                .map(|v| v.is_some_and(|s| s == value))
                .collect()
        }
        Predicate::In { values, .. } => {
            let ca = column.cast(&DataType::String)?;
            ca.str()?
                .iter()
                .map(|v| v.is_some_and(|s| values.iter().any(|known| known == s)))
                .collect()
        }
    };

    Ok(BooleanChunked::from_slice("mask".into(), &mask))
}

/// Apply an ordered sequence of predicates, producing a filtered view.
///
/// An empty result is a valid zero-row DataFrame, not an error. Every
/// downstream stage accepts such views.
pub fn apply_filters(
    base: &DataFrame,
    predicates: &[Predicate],
) -> Result<DataFrame, PipelineError> {
    let mut view = base.clone();
    for predicate in predicates {
        let mask = predicate_mask(&view, predicate)?;
        view = view.filter(&mask)?;
    }
    Ok(view)
}
