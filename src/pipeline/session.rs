//! One full analysis pass over the base record set
//!
//! The session layer is a pure function: identical (base set, request) input
//! produces bit-identical output, with no state carried between invocations.
//! The interactive caller owns its widget state and simply re-invokes this
//! with the current configuration on every change.

use polars::prelude::*;

use super::aggregate::{aggregate, AggregateTable, Metric};
use super::correlation::{rank_risk_factors, FactorRanking};
use super::derive::{with_age_groups, with_bmi_categories, with_outcome_indicator};
use super::error::{EmptyReason, PipelineError, StageOutcome, StageWarning};
use super::filter::{apply_filters, Predicate};
use super::grouping::AgeGrouping;

/// Explicit configuration for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Applied in order; callers put global demographic filters first.
    pub predicates: Vec<Predicate>,
    pub grouping: AgeGrouping,
    /// Candidate fields for the correlation ranking, canonical names.
    pub candidates: Vec<String>,
    /// 1 or 2 categorical group keys for the aggregate table.
    pub group_keys: Vec<String>,
    pub metrics: Vec<Metric>,
}

/// Result of one analysis pass, handed to the presentation layer.
#[derive(Debug)]
pub struct AnalysisReport {
    /// The filtered view with derived columns attached.
    pub view: DataFrame,
    /// The grouping actually applied (may differ from the request on
    /// fallback).
    pub grouping_used: AgeGrouping,
    pub warnings: Vec<StageWarning>,
    pub ranking: StageOutcome<FactorRanking>,
    pub aggregates: StageOutcome<AggregateTable>,
}

/// Run the full filter-and-metrics pipeline once.
///
/// The base set is read-only; every intermediate artifact is freshly
/// allocated and owned by this call. Quartile grouping that cannot form
/// distinct bins falls back to decades and records a warning instead of
/// aborting the pass.
pub fn run_analysis(
    base: &DataFrame,
    request: &AnalysisRequest,
) -> Result<AnalysisReport, PipelineError> {
    let view = apply_filters(base, &request.predicates)?;

    if view.height() == 0 {
        return Ok(AnalysisReport {
            view,
            grouping_used: request.grouping,
            warnings: Vec::new(),
            ranking: StageOutcome::Empty(EmptyReason::EmptyView),
            aggregates: StageOutcome::Empty(EmptyReason::EmptyView),
        });
    }

    let mut warnings = Vec::new();

    let view = with_outcome_indicator(&view)?;
    let view = with_bmi_categories(&view)?;
    let (view, grouping_used) = match with_age_groups(&view, request.grouping) {
        Ok(view) => (view, request.grouping),
        Err(PipelineError::InsufficientVariance { .. }) => {
            warnings.push(StageWarning::GroupingFallback {
                requested: request.grouping.to_string(),
            });
            (with_age_groups(&view, AgeGrouping::Decade)?, AgeGrouping::Decade)
        }
        Err(err) => return Err(err),
    };

    let ranking = if request.candidates.is_empty() {
        StageOutcome::Empty(EmptyReason::NoCandidates)
    } else {
        let candidates: Vec<&str> = request.candidates.iter().map(|s| s.as_str()).collect();
        let ranking = rank_risk_factors(&view, &candidates)?;
        let fallback_warnings: Vec<StageWarning> = ranking
            .fallback_fields()
            .iter()
            .map(|field| StageWarning::OrdinalFallback {
                field: field.to_string(),
            })
            .collect();
        StageOutcome::from_parts(ranking, fallback_warnings)
    };

    let aggregates = if request.group_keys.is_empty() {
        StageOutcome::Empty(EmptyReason::NoCandidates)
    } else {
        let keys: Vec<&str> = request.group_keys.iter().map(|s| s.as_str()).collect();
        StageOutcome::Complete(aggregate(&view, &keys, &request.metrics)?)
    };

    Ok(AnalysisReport {
        view,
        grouping_used,
        warnings,
        ranking,
        aggregates,
    })
}
