//! Derived fields attached to filtered views
//!
//! Each helper returns a fresh DataFrame with one extra column; the input
//! view (and the base set behind it) is never mutated. Only primitive
//! string/number columns are produced.

use polars::prelude::*;

use super::error::PipelineError;
use super::grouping::{assign_age_groups, AgeGrouping};
use crate::schema::{fields, ABSENCE_LABELS};

/// Column name of the derived binary outcome indicator.
pub const OUTCOME: &str = "outcome";

/// Column name of the derived age group.
pub const AGE_GROUP: &str = "age_group";

/// Column name of the derived body-mass category.
pub const BMI_CATEGORY: &str = "bmi_category";

/// Binary outcome per row: 1 when the recorded stage is not an absence
/// label, 0 when it is, null when the stage itself is null.
pub fn outcome_indicator(view: &DataFrame) -> Result<Vec<Option<i32>>, PipelineError> {
    let stage = view
        .column(fields::CANCER_STAGE)
        .map_err(|_| PipelineError::MissingColumn {
            column: fields::CANCER_STAGE.to_string(),
        })?
        .cast(&DataType::String)?;

    let indicator = stage
        .str()?
        .iter()
        .map(|v| v.map(|label| i32::from(!ABSENCE_LABELS.contains(&label))))
        .collect();

    Ok(indicator)
}

/// Attach the outcome indicator as an Int32 column named `outcome`.
pub fn with_outcome_indicator(view: &DataFrame) -> Result<DataFrame, PipelineError> {
    let indicator = outcome_indicator(view)?;
    Ok(view.hstack(&[Column::new(OUTCOME.into(), indicator)])?)
}

/// Fixed numeric-threshold body-mass bucketing.
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Attach the `bmi_category` string column. Null BMI stays null.
pub fn with_bmi_categories(view: &DataFrame) -> Result<DataFrame, PipelineError> {
    let bmi = view
        .column(fields::BMI)
        .map_err(|_| PipelineError::MissingColumn {
            column: fields::BMI.to_string(),
        })?
        .cast(&DataType::Float64)?;

    let categories: Vec<Option<&str>> = bmi
        .f64()?
        .iter()
        .map(|v| v.map(bmi_category))
        .collect();

    Ok(view.hstack(&[Column::new(BMI_CATEGORY.into(), categories)])?)
}

/// Attach the `age_group` string column under the given grouping strategy.
///
/// Grouping (including quartile boundaries) is computed over the non-null
/// ages of this view only; rows with a null age get a null group label.
pub fn with_age_groups(
    view: &DataFrame,
    grouping: AgeGrouping,
) -> Result<DataFrame, PipelineError> {
    let age = view
        .column(fields::AGE)
        .map_err(|_| PipelineError::MissingColumn {
            column: fields::AGE.to_string(),
        })?
        .cast(&DataType::Float64)?;

    let ages: Vec<Option<f64>> = age.f64()?.iter().collect();
    let valid: Vec<f64> = ages.iter().filter_map(|v| *v).collect();
    let labels = assign_age_groups(&valid, grouping)?;

    let mut labels_iter = labels.into_iter();
    let scattered: Vec<Option<String>> = ages
        .iter()
        .map(|v| v.and_then(|_| labels_iter.next()))
        .collect();

    Ok(view.hstack(&[Column::new(AGE_GROUP.into(), scattered)])?)
}
