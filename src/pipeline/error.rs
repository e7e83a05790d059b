//! Error taxonomy and tagged stage outcomes
//!
//! Fatal conditions (caller programming errors, schema violations) are
//! `PipelineError`. Expected data-shape conditions - empty views, skipped
//! factors, fallback coercion - are never errors; they travel inside result
//! values as explicit reasons so the caller can surface them.

use polars::prelude::PolarsError;
use serde::Serialize;
use thiserror::Error;

/// Fatal pipeline failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A numeric range filter with lower bound above upper bound. This is a
    /// caller bug, not a data condition.
    #[error("invalid filter range on '{field}': lower bound {lo} exceeds upper bound {hi}")]
    InvalidFilterRange { field: String, lo: f64, hi: f64 },

    /// Quartile grouping cannot form four distinct bins. Reported so the
    /// caller can fall back to another grouping strategy.
    #[error("cannot form quartile groups: {distinct} distinct age value(s), need at least 4")]
    InsufficientVariance { distinct: usize },

    /// Custom binning was requested with zero bins.
    #[error("invalid bin count: {n} (need at least 1)")]
    InvalidBinCount { n: usize },

    /// A referenced column does not exist in the view.
    #[error("column '{column}' not found in view")]
    MissingColumn { column: String },

    /// Grouped aggregation supports one or two group keys.
    #[error("aggregation takes 1 or 2 group keys, got {got}")]
    InvalidGroupKeyCount { got: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Why a candidate factor was excluded from the correlation ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Fewer than 2 rows remained after dropping nulls.
    InsufficientData,
    /// The factor or the outcome had a single unique value.
    ZeroVariance,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InsufficientData => write!(f, "insufficient data"),
            SkipReason::ZeroVariance => write!(f, "zero variance"),
        }
    }
}

/// Why a stage produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    /// The filter chain left zero rows. Valid, not an error.
    EmptyView,
    /// No candidate fields or group keys were supplied.
    NoCandidates,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::EmptyView => write!(f, "no rows after filtering"),
            EmptyReason::NoCandidates => write!(f, "nothing requested"),
        }
    }
}

/// A non-fatal degradation the caller may want to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StageWarning {
    /// An ordinal column's vocabulary was entirely unrecognized and was
    /// coerced with arbitrary first-occurrence codes.
    OrdinalFallback { field: String },
    /// The requested grouping strategy could not be applied and the decade
    /// strategy was used instead.
    GroupingFallback { requested: String },
}

impl std::fmt::Display for StageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageWarning::OrdinalFallback { field } => write!(
                f,
                "'{}' used arbitrary category codes (vocabulary unrecognized)",
                field
            ),
            StageWarning::GroupingFallback { requested } => write!(
                f,
                "'{}' grouping not applicable, fell back to decades",
                requested
            ),
        }
    }
}

/// Tagged outcome of an analysis stage.
///
/// Replaces silent catch-all handling: an empty view and a degraded result
/// are distinct, displayable states rather than absent data.
#[derive(Debug, Clone, Serialize)]
pub enum StageOutcome<T> {
    Complete(T),
    Empty(EmptyReason),
    Degraded {
        data: T,
        warnings: Vec<StageWarning>,
    },
}

impl<T> StageOutcome<T> {
    /// The stage data, if any was produced.
    pub fn data(&self) -> Option<&T> {
        match self {
            StageOutcome::Complete(data) => Some(data),
            StageOutcome::Degraded { data, .. } => Some(data),
            StageOutcome::Empty(_) => None,
        }
    }

    /// Wrap `data`, degrading the outcome when warnings exist.
    pub fn from_parts(data: T, warnings: Vec<StageWarning>) -> Self {
        if warnings.is_empty() {
            StageOutcome::Complete(data)
        } else {
            StageOutcome::Degraded { data, warnings }
        }
    }
}
