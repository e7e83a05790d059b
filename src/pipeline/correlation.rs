//! Correlation ranking of risk factors against the binary outcome
//!
//! For each candidate field: coerce to numbers if needed, drop rows missing
//! on either side, and compute the Pearson correlation with the outcome
//! indicator. Degenerate fields are skipped with an explicit reason instead
//! of failing - sparse and partially-missing views are the normal case, not
//! an error path.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::coerce::{coerce_ordinal, fallback_codes, CoercedColumn};
use super::derive::outcome_indicator;
use super::error::{PipelineError, SkipReason};
use crate::schema::OrdinalField;

/// Correlations with magnitude below this are numerically indistinguishable
/// from zero and are discarded from the ranking.
const NEGLIGIBLE_CORRELATION: f64 = 1e-10;

/// One ranked factor.
#[derive(Debug, Clone, Serialize)]
pub struct RankedFactor {
    pub field: String,
    /// Signed Pearson coefficient.
    pub correlation: f64,
    /// `|correlation|`, the ranking key.
    pub magnitude: f64,
    /// True when the factor's values came from fallback coercion, i.e. the
    /// numeric scale behind this correlation is arbitrary.
    pub ordinal_fallback: bool,
}

/// A candidate excluded from the ranking, with its reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFactor {
    pub field: String,
    pub reason: SkipReason,
}

/// Ranking result: survivors ascending by magnitude, plus explicit skips.
#[derive(Debug, Clone, Serialize)]
pub struct FactorRanking {
    pub factors: Vec<RankedFactor>,
    pub skipped: Vec<SkippedFactor>,
}

impl FactorRanking {
    /// Fields that degraded to fallback coercion.
    pub fn fallback_fields(&self) -> Vec<&str> {
        self.factors
            .iter()
            .filter(|f| f.ordinal_fallback)
            .map(|f| f.field.as_str())
            .collect()
    }
}

enum FactorOutcome {
    Ranked(RankedFactor),
    Skipped(SkippedFactor),
    /// |r| below the negligible threshold, or NaN.
    Discarded,
}

/// Rank candidate fields by absolute correlation with the outcome indicator.
///
/// The contract is "ascending by |r|"; a presentation layer wanting the
/// strongest factor first reverses the order itself. Candidate fields that
/// are non-numeric go through ordinal coercion; string fields without a
/// known rank table get flagged fallback codes. Per-field work runs in
/// parallel and is re-sorted afterwards, so the result is deterministic.
pub fn rank_risk_factors(
    view: &DataFrame,
    candidates: &[&str],
) -> Result<FactorRanking, PipelineError> {
    let outcome = outcome_indicator(view)?;

    let columns: Vec<(String, CoercedColumn)> = candidates
        .iter()
        .map(|&name| Ok((name.to_string(), numeric_column(view, name)?)))
        .collect::<Result<_, PipelineError>>()?;

    let outcomes: Vec<FactorOutcome> = columns
        .par_iter()
        .map(|(name, column)| correlate_factor(name, column, &outcome))
        .collect();

    let mut factors = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            FactorOutcome::Ranked(f) => factors.push(f),
            FactorOutcome::Skipped(s) => skipped.push(s),
            FactorOutcome::Discarded => {}
        }
    }

    factors.sort_by(|a, b| {
        a.magnitude
            .partial_cmp(&b.magnitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(FactorRanking { factors, skipped })
}

/// A candidate column on the common numeric scale: numeric columns pass
/// through unchanged, string columns are coerced.
fn numeric_column(view: &DataFrame, name: &str) -> Result<CoercedColumn, PipelineError> {
    let column = view.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })?;

    if column.dtype().is_primitive_numeric() {
        let values = column.cast(&DataType::Float64)?.f64()?.iter().collect();
        return Ok(CoercedColumn {
            values,
            fallback: false,
        });
    }

    let ca = column.cast(&DataType::String)?;
    let labels: Vec<Option<&str>> = ca.str()?.iter().collect();

    Ok(match OrdinalField::for_canonical(name) {
        Some(field) => coerce_ordinal(&labels, field),
        None => fallback_codes(&labels),
    })
}

fn correlate_factor(
    name: &str,
    column: &CoercedColumn,
    outcome: &[Option<i32>],
) -> FactorOutcome {
    let skip = |reason| {
        FactorOutcome::Skipped(SkippedFactor {
            field: name.to_string(),
            reason,
        })
    };

    // Drop rows missing the factor value or the outcome.
    let (xs, ys): (Vec<f64>, Vec<f64>) = column
        .values
        .iter()
        .zip(outcome.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((*x, f64::from(*y))),
            _ => None,
        })
        .unzip();

    if xs.len() < 2 {
        return skip(SkipReason::InsufficientData);
    }
    if is_constant(&xs) || is_constant(&ys) {
        return skip(SkipReason::ZeroVariance);
    }

    match pearson(&xs, &ys) {
        Some(r) if r.abs() >= NEGLIGIBLE_CORRELATION && !r.is_nan() => {
            FactorOutcome::Ranked(RankedFactor {
                field: name.to_string(),
                correlation: r,
                magnitude: r.abs(),
                ordinal_fallback: column.fallback,
            })
        }
        Some(_) => FactorOutcome::Discarded,
        // Variance vanished inside the computation despite the pre-check.
        None => skip(SkipReason::ZeroVariance),
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson correlation via a single-pass Welford update.
///
/// Symmetric in its arguments: `pearson(x, y) == pearson(y, x)`. Returns
/// None for mismatched or short inputs and for zero variance on either side.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    let std_x = (var_x / n).sqrt();
    let std_y = (var_y / n).sqrt();

    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (n * std_x * std_y))
}
