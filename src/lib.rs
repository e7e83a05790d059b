//! Riskscope: Cohort Risk-Factor Analysis Library
//!
//! A library for exploring patient-level risk-factor datasets through
//! cascading filters, derived age groupings, ordinal coercion, and
//! correlation/aggregate summaries.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod utils;
