//! Grouped aggregate statistics over one or two categorical keys
//!
//! Emits exactly one row per key combination observed in the view - never a
//! cross-product of all theoretically possible combinations, which would
//! carry undefined statistics. Rows with a null value in any group key are
//! excluded. Output rows are sorted by key strings so repeated runs over the
//! same view are bit-identical.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineError;
use super::filter::{predicate_mask, Predicate};

/// A grouped statistic to compute.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// Row count per group.
    Count,
    /// Mean of a numeric field per group; None for an all-null group.
    Mean(String),
    /// Percentage of rows in the group satisfying the predicate.
    Rate(Predicate),
}

impl Metric {
    pub fn mean(field: &str) -> Self {
        Metric::Mean(field.to_string())
    }

    /// Column name for this metric in the result table.
    pub fn name(&self) -> String {
        match self {
            Metric::Count => "count".to_string(),
            Metric::Mean(field) => format!("mean_{}", field),
            Metric::Rate(predicate) => format!("rate_pct_{}", predicate.field()),
        }
    }
}

/// One result row: the observed key combination and its metric values.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRow {
    pub keys: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Grouped aggregate result table.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateTable {
    pub group_keys: Vec<String>,
    pub metric_names: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

/// Compute grouped statistics over 1 or 2 categorical key columns.
///
/// A zero-row view yields a table with zero rows. Key combination order
/// affects presentation only, never which rows are produced.
pub fn aggregate(
    view: &DataFrame,
    keys: &[&str],
    metrics: &[Metric],
) -> Result<AggregateTable, PipelineError> {
    if keys.is_empty() || keys.len() > 2 {
        return Err(PipelineError::InvalidGroupKeyCount { got: keys.len() });
    }

    let key_columns: Vec<Vec<Option<String>>> = keys
        .iter()
        .map(|&key| string_column(view, key))
        .collect::<Result<_, PipelineError>>()?;

    // Resolve every metric input up front so group loops stay cheap.
    let metric_inputs: Vec<MetricInput> = metrics
        .iter()
        .map(|metric| MetricInput::resolve(view, metric))
        .collect::<Result<_, PipelineError>>()?;

    // Observed combinations only, sorted by key tuple.
    let mut groups: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
    'rows: for row in 0..view.height() {
        let mut tuple = Vec::with_capacity(keys.len());
        for column in &key_columns {
            match &column[row] {
                Some(value) => tuple.push(value.clone()),
                None => continue 'rows,
            }
        }
        groups.entry(tuple).or_default().push(row);
    }

    let rows = groups
        .into_iter()
        .map(|(tuple, indices)| AggregateRow {
            keys: tuple,
            values: metric_inputs
                .iter()
                .map(|input| input.evaluate(&indices))
                .collect(),
        })
        .collect();

    Ok(AggregateTable {
        group_keys: keys.iter().map(|k| k.to_string()).collect(),
        metric_names: metrics.iter().map(Metric::name).collect(),
        rows,
    })
}

enum MetricInput {
    Count,
    Mean(Vec<Option<f64>>),
    Rate(Vec<bool>),
}

impl MetricInput {
    fn resolve(view: &DataFrame, metric: &Metric) -> Result<MetricInput, PipelineError> {
        Ok(match metric {
            Metric::Count => MetricInput::Count,
            Metric::Mean(field) => {
                let column = view
                    .column(field)
                    .map_err(|_| PipelineError::MissingColumn {
                        column: field.clone(),
                    })?
                    .cast(&DataType::Float64)?;
                MetricInput::Mean(column.f64()?.iter().collect())
            }
            Metric::Rate(predicate) => {
                let mask = predicate_mask(view, predicate)?;
                MetricInput::Rate(mask.iter().map(|v| v.unwrap_or(false)).collect())
            }
        })
    }

    fn evaluate(&self, indices: &[usize]) -> Option<f64> {
        match self {
            MetricInput::Count => Some(indices.len() as f64),
            MetricInput::Mean(values) => {
                let valid: Vec<f64> = indices.iter().filter_map(|&i| values[i]).collect();
                if valid.is_empty() {
                    None
                } else {
                    Some(valid.iter().sum::<f64>() / valid.len() as f64)
                }
            }
            MetricInput::Rate(mask) => {
                let hits = indices.iter().filter(|&&i| mask[i]).count();
                Some(hits as f64 / indices.len() as f64 * 100.0)
            }
        }
    }
}

fn string_column(view: &DataFrame, name: &str) -> Result<Vec<Option<String>>, PipelineError> {
    let column = view
        .column(name)
        .map_err(|_| PipelineError::MissingColumn {
            column: name.to_string(),
        })?
        .cast(&DataType::String)?;

    Ok(column
        .str()?
        .iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
