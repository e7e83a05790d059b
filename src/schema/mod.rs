//! Schema adapter - binds canonical field names onto concrete dataset variants
//!
//! The same semantic schema ships under more than one column-naming and value
//! vocabulary (the public dataset circulates in English and in a Portuguese
//! translation). The adapter detects which variant a loaded DataFrame uses,
//! validates that every required column is present, and renames the columns to
//! canonical names so the rest of the pipeline never sees locale-specific
//! naming.

use polars::prelude::*;
use thiserror::Error;

/// Canonical field names used throughout the pipeline.
pub mod fields {
    pub const AGE: &str = "age";
    pub const SEX: &str = "sex";
    pub const REGION: &str = "region";
    pub const SMOKING_STATUS: &str = "smoking_status";
    pub const YEARS_SMOKING: &str = "years_smoking";
    pub const CIGARETTES_PER_DAY: &str = "cigarettes_per_day";
    pub const AIR_POLLUTION: &str = "air_pollution";
    pub const BMI: &str = "bmi";
    pub const PHYSICAL_ACTIVITY: &str = "physical_activity";
    pub const DIET_QUALITY: &str = "diet_quality";
    pub const INCOME_LEVEL: &str = "income_level";
    pub const EDUCATION_LEVEL: &str = "education_level";
    pub const CANCER_STAGE: &str = "cancer_stage";
    pub const SURVIVAL_STATUS: &str = "survival_status";
}

/// Labels in the `cancer_stage` column that mean "no condition recorded".
///
/// Covers both supported vocabularies; the outcome indicator is true for any
/// other non-null stage label.
pub const ABSENCE_LABELS: &[&str] = &["No Cancer", "None", "Sem Câncer"];

/// Errors raised while binding a dataset to the canonical schema.
///
/// These are load-time failures and abort the pipeline; a dataset that binds
/// successfully can no longer fail on schema grounds at analysis time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The closest-matching variant is still missing required columns.
    #[error("dataset does not match the '{variant}' schema: missing required column(s) {columns:?}")]
    MissingColumns {
        variant: &'static str,
        columns: Vec<String>,
    },

    /// No known variant shares a single column with the dataset.
    #[error("dataset matches no known schema variant (expected one of: {variants:?})")]
    UnrecognizedSchema { variants: Vec<&'static str> },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// One concrete naming variant of the canonical schema.
///
/// `columns` maps canonical field name to the source column name used by this
/// variant. Every listed column is required at load time.
#[derive(Debug, Clone, Copy)]
pub struct SchemaVariant {
    pub name: &'static str,
    columns: &'static [(&'static str, &'static str)],
}

const ENGLISH_COLUMNS: &[(&str, &str)] = &[
    (fields::AGE, "Age"),
    (fields::SEX, "Gender"),
    (fields::REGION, "Region"),
    (fields::SMOKING_STATUS, "Smoking_Status"),
    (fields::YEARS_SMOKING, "Years_Smoking"),
    (fields::CIGARETTES_PER_DAY, "Cigarettes_Per_Day"),
    (fields::AIR_POLLUTION, "Air_Pollution_Level"),
    (fields::BMI, "BMI"),
    (fields::PHYSICAL_ACTIVITY, "Physical_Activity_Level"),
    (fields::DIET_QUALITY, "Diet_Quality"),
    (fields::INCOME_LEVEL, "Income_Level"),
    (fields::EDUCATION_LEVEL, "Education_Level"),
    (fields::CANCER_STAGE, "Lung_Cancer_Stage"),
    (fields::SURVIVAL_STATUS, "Survival_Status"),
];

const PORTUGUESE_COLUMNS: &[(&str, &str)] = &[
    (fields::AGE, "Idade"),
    (fields::SEX, "Genero"),
    (fields::REGION, "Regiao"),
    (fields::SMOKING_STATUS, "Status_Tabagismo"),
    (fields::YEARS_SMOKING, "Anos_Fumando"),
    (fields::CIGARETTES_PER_DAY, "Cigarros_Por_Dia"),
    (fields::AIR_POLLUTION, "Nivel_Poluicao_Ar"),
    (fields::BMI, "IMC"),
    (fields::PHYSICAL_ACTIVITY, "Nivel_Atividade_Fisica"),
    (fields::DIET_QUALITY, "Qualidade_Dieta"),
    (fields::INCOME_LEVEL, "Nivel_Renda"),
    (fields::EDUCATION_LEVEL, "Nivel_Educacao"),
    (fields::CANCER_STAGE, "Estagio_Cancer_Pulmao"),
    (fields::SURVIVAL_STATUS, "Status_Sobrevivencia"),
];

impl SchemaVariant {
    pub fn english() -> Self {
        Self {
            name: "english",
            columns: ENGLISH_COLUMNS,
        }
    }

    pub fn portuguese() -> Self {
        Self {
            name: "portuguese",
            columns: PORTUGUESE_COLUMNS,
        }
    }

    /// All supported variants, in detection order.
    pub fn all() -> Vec<SchemaVariant> {
        vec![Self::english(), Self::portuguese()]
    }

    /// Source column names this variant requires.
    pub fn required_columns(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(_, source)| *source).collect()
    }

    /// Required source columns absent from the DataFrame.
    pub fn missing_columns(&self, df: &DataFrame) -> Vec<String> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        self.columns
            .iter()
            .filter(|(_, source)| !present.contains(&source.to_string()))
            .map(|(_, source)| source.to_string())
            .collect()
    }

    /// Count of required source columns present in the DataFrame.
    fn match_count(&self, df: &DataFrame) -> usize {
        self.columns.len() - self.missing_columns(df).len()
    }

    /// Rename this variant's source columns to their canonical names.
    ///
    /// Fails if any required column is missing. Extra columns are left
    /// untouched; the pipeline simply ignores them.
    pub fn bind(&self, df: DataFrame) -> Result<DataFrame, SchemaError> {
        let missing = self.missing_columns(&df);
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                variant: self.name,
                columns: missing,
            });
        }

        let mut df = df;
        for (canonical, source) in self.columns {
            df.rename(source, (*canonical).into())?;
        }
        Ok(df)
    }
}

/// Detect the schema variant of a raw DataFrame and bind it.
///
/// Picks the variant with a full column match; if none matches fully, the
/// variant with the most matching columns names the missing ones in the
/// error. A dataset sharing no columns with any variant is unrecognized.
pub fn detect_and_bind(df: DataFrame) -> Result<(DataFrame, &'static str), SchemaError> {
    let variants = SchemaVariant::all();

    if let Some(variant) = variants.iter().find(|v| v.missing_columns(&df).is_empty()) {
        let name = variant.name;
        return Ok((variant.bind(df)?, name));
    }

    let best = variants
        .iter()
        .max_by_key(|v| v.match_count(&df))
        .copied()
        .unwrap_or_else(SchemaVariant::english);

    if best.match_count(&df) == 0 {
        return Err(SchemaError::UnrecognizedSchema {
            variants: variants.iter().map(|v| v.name).collect(),
        });
    }

    Err(SchemaError::MissingColumns {
        variant: best.name,
        columns: best.missing_columns(&df),
    })
}

/// Ordinal fields with a fixed rank domain.
///
/// Each field owns a canonical rank table covering every label spelling the
/// supported vocabularies use, so "Low" and "Baixa" both coerce to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalField {
    IncomeLevel,
    EducationLevel,
    AirPollution,
    PhysicalActivity,
    DietQuality,
}

impl OrdinalField {
    /// Look up the ordinal field owning a canonical column name.
    pub fn for_canonical(name: &str) -> Option<OrdinalField> {
        match name {
            fields::INCOME_LEVEL => Some(OrdinalField::IncomeLevel),
            fields::EDUCATION_LEVEL => Some(OrdinalField::EducationLevel),
            fields::AIR_POLLUTION => Some(OrdinalField::AirPollution),
            fields::PHYSICAL_ACTIVITY => Some(OrdinalField::PhysicalActivity),
            fields::DIET_QUALITY => Some(OrdinalField::DietQuality),
            _ => None,
        }
    }

    /// Rank table over the known vocabulary, both locales included.
    pub fn rank_table(&self) -> &'static [(&'static str, f64)] {
        match self {
            OrdinalField::IncomeLevel => &[
                ("Low", 1.0),
                ("Middle", 2.0),
                ("High", 3.0),
                ("Baixa", 1.0),
                ("Média", 2.0),
                ("Alta", 3.0),
            ],
            OrdinalField::EducationLevel => &[
                ("Primary", 1.0),
                ("Secondary", 2.0),
                ("Tertiary", 3.0),
                ("Fundamental", 1.0),
                ("Médio", 2.0),
                ("Superior", 3.0),
            ],
            OrdinalField::AirPollution | OrdinalField::PhysicalActivity => &[
                ("Low", 1.0),
                ("Moderate", 2.0),
                ("High", 3.0),
                ("Baixo", 1.0),
                ("Moderado", 2.0),
                ("Alto", 3.0),
            ],
            OrdinalField::DietQuality => &[
                ("Poor", 1.0),
                ("Average", 2.0),
                ("Good", 3.0),
                ("Ruim", 1.0),
                ("Média", 2.0),
                ("Boa", 3.0),
            ],
        }
    }

    /// Rank of a single label, or None when the label is outside the
    /// known vocabulary.
    pub fn rank_of(&self, label: &str) -> Option<f64> {
        self.rank_table()
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, rank)| *rank)
    }
}
