//! Riskscope: Cohort Risk-Factor Analysis CLI
//!
//! Loads a cohort dataset, applies the filter chain built from the command
//! line, runs one full analysis pass, and renders the three result tables.
//! The pipeline itself is stateless; this binary is the external caller that
//! owns the configuration.

mod cli;
mod pipeline;
mod report;
mod schema;
mod utils;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;

use cli::Cli;
use pipeline::{load_bound_dataset, run_analysis, AnalysisRequest, Metric, Predicate, StageOutcome};
use report::{
    aggregate_table, print_warnings, ranking_table, view_preview_table, JsonReport,
};
use utils::{create_spinner, finish_with_success, print_banner, print_info, print_step_header};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let grouping = cli.grouping().map_err(|msg| anyhow::anyhow!(msg))?;
    let predicates = cli.predicates();

    if !cli.json {
        print_banner(env!("CARGO_PKG_VERSION"));
    }

    // Load once; the base set stays immutable for the rest of the process.
    let spinner = (!cli.json).then(|| create_spinner("Loading dataset..."));
    let (base, variant) = load_bound_dataset(&cli.input)?;
    if let Some(spinner) = &spinner {
        finish_with_success(spinner, &format!("Dataset loaded ({} schema)", variant));
        let (rows, cols) = base.shape();
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        println!(
            "      Estimated memory: {:.2} MB",
            base.estimated_size() as f64 / (1024.0 * 1024.0)
        );
    }

    let request = AnalysisRequest {
        predicates,
        grouping,
        candidates: cli.factors.clone(),
        group_keys: cli.group_by.clone(),
        metrics: vec![
            Metric::Count,
            Metric::mean(schema::fields::AGE),
            Metric::mean(schema::fields::BMI),
            Metric::Rate(Predicate::equals(pipeline::OUTCOME, "1")),
        ],
    };

    let report = run_analysis(&base, &request)?;

    if cli.json {
        let json = JsonReport::new(
            variant,
            base.height(),
            report.view.height(),
            report.warnings.clone(),
            report.ranking,
            report.aggregates,
        );
        println!("{}", json.to_pretty_json()?);
        return Ok(());
    }

    print_warnings(&report.warnings);

    print_step_header(1, "Filtered View");
    print_info(&format!(
        "{} of {} records match the filter chain",
        report.view.height(),
        base.height()
    ));
    if report.view.height() > 0 && cli.preview > 0 {
        println!("{}", view_preview_table(&report.view, cli.preview));
    }

    print_step_header(2, "Risk Factor Ranking");
    match &report.ranking {
        StageOutcome::Complete(ranking) => println!("{}", ranking_table(ranking)),
        StageOutcome::Degraded { data, warnings } => {
            print_warnings(warnings);
            println!("{}", ranking_table(data));
        }
        StageOutcome::Empty(reason) => print_info(&format!("No ranking: {}", reason)),
    }

    print_step_header(3, &format!("Grouped Statistics ({})", report.grouping_used));
    match &report.aggregates {
        StageOutcome::Complete(aggregates) => println!("{}", aggregate_table(aggregates)),
        StageOutcome::Degraded { data, warnings } => {
            print_warnings(warnings);
            println!("{}", aggregate_table(data));
        }
        StageOutcome::Empty(reason) => print_info(&format!("No aggregates: {}", reason)),
    }

    println!();
    println!(
        "    {}",
        style(format!(
            "Generated {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))
        .dim()
    );

    Ok(())
}
