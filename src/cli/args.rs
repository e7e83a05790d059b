//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{AgeGrouping, Predicate};
use crate::schema::fields;

/// Riskscope - explore a cohort risk-factor dataset through cascading
/// filters, age grouping, and correlation/aggregate summaries
#[derive(Parser, Debug)]
#[command(name = "riskscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input dataset (CSV or Parquet). Column naming may follow any
    /// supported schema variant; it is detected at load time.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum age (inclusive)
    #[arg(long)]
    pub age_min: Option<f64>,

    /// Maximum age (inclusive)
    #[arg(long)]
    pub age_max: Option<f64>,

    /// Keep only this sex (value as spelled in the dataset)
    #[arg(long)]
    pub sex: Option<String>,

    /// Keep only this region
    #[arg(long)]
    pub region: Option<String>,

    /// Keep only this smoking status
    #[arg(long)]
    pub smoking_status: Option<String>,

    /// Minimum BMI (inclusive)
    #[arg(long)]
    pub bmi_min: Option<f64>,

    /// Maximum BMI (inclusive)
    #[arg(long)]
    pub bmi_max: Option<f64>,

    /// Keep only these income levels (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub income: Vec<String>,

    /// Keep only these education levels (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub education: Vec<String>,

    /// Age grouping strategy: "decade", "quartile", or "custom"
    #[arg(long, default_value = "decade")]
    pub age_grouping: String,

    /// Number of equal-width bins for the "custom" grouping
    #[arg(long, default_value = "5")]
    pub age_bins: usize,

    /// Group keys for the aggregate table (1 or 2, comma-separated).
    /// Canonical names plus the derived "age_group" and "bmi_category".
    #[arg(long, value_delimiter = ',', default_value = "age_group")]
    pub group_by: Vec<String>,

    /// Candidate fields for the correlation ranking (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "age,years_smoking,cigarettes_per_day,bmi,air_pollution,income_level,education_level,physical_activity,diet_quality"
    )]
    pub factors: Vec<String>,

    /// Rows of the filtered view to print
    #[arg(long, default_value = "10")]
    pub preview: usize,

    /// Emit the results as JSON instead of styled tables
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve the grouping strategy from `--age-grouping`/`--age-bins`.
    pub fn grouping(&self) -> Result<AgeGrouping, String> {
        match self.age_grouping.to_lowercase().as_str() {
            "decade" => Ok(AgeGrouping::Decade),
            "quartile" => Ok(AgeGrouping::Quartile),
            "custom" => Ok(AgeGrouping::CustomBins(self.age_bins)),
            other => Err(format!(
                "Unknown age grouping: '{}'. Use 'decade', 'quartile' or 'custom'.",
                other
            )),
        }
    }

    /// Build the predicate chain in the conventional order: global
    /// demographic filters first, page-specific refinements after.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if self.age_min.is_some() || self.age_max.is_some() {
            predicates.push(Predicate::range(
                fields::AGE,
                self.age_min.unwrap_or(f64::NEG_INFINITY),
                self.age_max.unwrap_or(f64::INFINITY),
            ));
        }
        if let Some(sex) = &self.sex {
            predicates.push(Predicate::equals(fields::SEX, sex));
        }
        if let Some(region) = &self.region {
            predicates.push(Predicate::equals(fields::REGION, region));
        }
        if let Some(status) = &self.smoking_status {
            predicates.push(Predicate::equals(fields::SMOKING_STATUS, status));
        }

        if self.bmi_min.is_some() || self.bmi_max.is_some() {
            predicates.push(Predicate::range(
                fields::BMI,
                self.bmi_min.unwrap_or(f64::NEG_INFINITY),
                self.bmi_max.unwrap_or(f64::INFINITY),
            ));
        }
        if !self.income.is_empty() {
            let values: Vec<&str> = self.income.iter().map(|s| s.as_str()).collect();
            predicates.push(Predicate::in_set(fields::INCOME_LEVEL, &values));
        }
        if !self.education.is_empty() {
            let values: Vec<&str> = self.education.iter().map(|s| s.as_str()).collect();
            predicates.push(Predicate::in_set(fields::EDUCATION_LEVEL, &values));
        }

        predicates
    }
}
