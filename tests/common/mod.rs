//! Shared test fixtures: small cohort datasets in both schema variants
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// A 12-row cohort using the English column naming and vocabulary.
///
/// Older heavy smokers carry cancer stages so correlation tests have real
/// signal to find.
pub fn cohort_en() -> DataFrame {
    df! {
        "Age" => [34i64, 45, 52, 61, 48, 70, 38, 55, 63, 29, 58, 44],
        "Gender" => ["Male", "Female", "Male", "Male", "Female", "Male", "Female", "Male", "Female", "Male", "Male", "Female"],
        "Region" => ["North", "South", "East", "West", "North", "South", "East", "West", "North", "South", "East", "West"],
        "Smoking_Status" => ["Never", "Former", "Current", "Current", "Never", "Current", "Never", "Former", "Current", "Never", "Current", "Former"],
        "Years_Smoking" => [0i64, 8, 25, 35, 0, 45, 0, 12, 30, 0, 28, 5],
        "Cigarettes_Per_Day" => [0i64, 5, 20, 30, 0, 40, 0, 8, 25, 0, 22, 3],
        "Air_Pollution_Level" => ["Low", "Moderate", "High", "High", "Low", "High", "Moderate", "Low", "High", "Low", "Moderate", "Moderate"],
        "BMI" => [22.5f64, 27.1, 31.0, 24.8, 19.3, 29.9, 23.4, 26.0, 33.2, 17.9, 28.4, 21.7],
        "Physical_Activity_Level" => ["High", "Moderate", "Low", "Low", "High", "Low", "Moderate", "Moderate", "Low", "High", "Low", "High"],
        "Diet_Quality" => ["Good", "Average", "Poor", "Poor", "Good", "Poor", "Average", "Good", "Poor", "Good", "Average", "Good"],
        "Income_Level" => ["Middle", "High", "Low", "Low", "High", "Low", "Middle", "High", "Low", "Middle", "Middle", "High"],
        "Education_Level" => ["Secondary", "Tertiary", "Primary", "Primary", "Tertiary", "Primary", "Secondary", "Tertiary", "Primary", "Secondary", "Secondary", "Tertiary"],
        "Lung_Cancer_Stage" => ["No Cancer", "No Cancer", "Stage II", "Stage III", "No Cancer", "Stage IV", "No Cancer", "No Cancer", "Stage III", "No Cancer", "Stage I", "No Cancer"],
        "Survival_Status" => ["Alive", "Alive", "Alive", "Deceased", "Alive", "Deceased", "Alive", "Alive", "Alive", "Alive", "Alive", "Alive"],
    }
    .unwrap()
}

/// The same cohort shape under the Portuguese column naming and vocabulary.
pub fn cohort_pt() -> DataFrame {
    df! {
        "Idade" => [34i64, 45, 52, 61, 48, 70],
        "Genero" => ["Masculino", "Feminino", "Masculino", "Masculino", "Feminino", "Masculino"],
        "Regiao" => ["Norte", "Sul", "Leste", "Oeste", "Norte", "Sul"],
        "Status_Tabagismo" => ["Nunca", "Ex-fumante", "Atual", "Atual", "Nunca", "Atual"],
        "Anos_Fumando" => [0i64, 8, 25, 35, 0, 45],
        "Cigarros_Por_Dia" => [0i64, 5, 20, 30, 0, 40],
        "Nivel_Poluicao_Ar" => ["Baixo", "Moderado", "Alto", "Alto", "Baixo", "Alto"],
        "IMC" => [22.5f64, 27.1, 31.0, 24.8, 19.3, 29.9],
        "Nivel_Atividade_Fisica" => ["Alto", "Moderado", "Baixo", "Baixo", "Alto", "Baixo"],
        "Qualidade_Dieta" => ["Boa", "Média", "Ruim", "Ruim", "Boa", "Ruim"],
        "Nivel_Renda" => ["Média", "Alta", "Baixa", "Baixa", "Alta", "Baixa"],
        "Nivel_Educacao" => ["Médio", "Superior", "Fundamental", "Fundamental", "Superior", "Fundamental"],
        "Estagio_Cancer_Pulmao" => ["Sem Câncer", "Sem Câncer", "Estágio II", "Estágio III", "Sem Câncer", "Estágio IV"],
        "Status_Sobrevivencia" => ["Vivo", "Vivo", "Vivo", "Falecido", "Vivo", "Falecido"],
    }
    .unwrap()
}

/// The English cohort bound to canonical column names.
pub fn bound_en() -> DataFrame {
    let (df, variant) = riskscope::schema::detect_and_bind(cohort_en()).unwrap();
    assert_eq!(variant, "english");
    df
}

/// A minimal canonical-name DataFrame for targeted pipeline tests.
pub fn canonical_frame(
    ages: &[f64],
    stages: &[&str],
) -> DataFrame {
    df! {
        "age" => ages,
        "cancer_stage" => stages,
    }
    .unwrap()
}

/// Write a DataFrame to a temp CSV; the TempDir guard must stay alive.
pub fn write_temp_csv(df: &DataFrame) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cohort.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df.clone()).unwrap();
    (dir, path)
}
