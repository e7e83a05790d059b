//! JSON export of analysis results

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::pipeline::{AggregateTable, FactorRanking, StageOutcome, StageWarning};

/// Serializable snapshot of one analysis pass.
///
/// The filtered view itself is not exported; the three result shapes plus
/// run metadata are.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub schema_variant: String,
    pub base_rows: usize,
    pub filtered_rows: usize,
    pub warnings: Vec<StageWarning>,
    pub ranking: StageOutcome<FactorRanking>,
    pub aggregates: StageOutcome<AggregateTable>,
}

impl JsonReport {
    pub fn new(
        schema_variant: &str,
        base_rows: usize,
        filtered_rows: usize,
        warnings: Vec<StageWarning>,
        ranking: StageOutcome<FactorRanking>,
        aggregates: StageOutcome<AggregateTable>,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            schema_variant: schema_variant.to_string(),
            base_rows,
            filtered_rows,
            warnings,
            ranking,
            aggregates,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
