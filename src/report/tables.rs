//! Terminal tables for the three result shapes

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::{AggregateTable, FactorRanking, StageWarning};

/// Render the first `limit` rows of the filtered view.
pub fn view_preview_table(view: &DataFrame, limit: usize) -> Table {
    let head = view.head(Some(limit));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        head.get_column_names()
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );

    let columns: Vec<Vec<String>> = head
        .get_columns()
        .iter()
        .map(|column| {
            column
                .cast(&DataType::String)
                .ok()
                .and_then(|c| {
                    c.str().ok().map(|ca| {
                        ca.iter()
                            .map(|v| v.unwrap_or("").to_string())
                            .collect::<Vec<String>>()
                    })
                })
                .unwrap_or_else(|| vec![String::new(); head.height()])
        })
        .collect();

    for row in 0..head.height() {
        table.add_row(columns.iter().map(|col| Cell::new(&col[row])));
    }

    table
}

/// Render the correlation ranking, strongest factor first.
///
/// The engine sorts ascending by magnitude; display convention here is
/// descending, so the order is reversed.
pub fn ranking_table(ranking: &FactorRanking) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Factor").add_attribute(Attribute::Bold),
        Cell::new("|r|").add_attribute(Attribute::Bold),
        Cell::new("r").add_attribute(Attribute::Bold),
        Cell::new("Scale").add_attribute(Attribute::Bold),
    ]);

    for factor in ranking.factors.iter().rev() {
        let scale = if factor.ordinal_fallback {
            Cell::new("arbitrary").fg(Color::Yellow)
        } else {
            Cell::new("ordinal/numeric")
        };
        table.add_row(vec![
            Cell::new(&factor.field),
            Cell::new(format!("{:.4}", factor.magnitude)),
            Cell::new(format!("{:+.4}", factor.correlation)),
            scale,
        ]);
    }

    for skipped in &ranking.skipped {
        table.add_row(vec![
            Cell::new(&skipped.field).fg(Color::DarkGrey),
            Cell::new("-").fg(Color::DarkGrey),
            Cell::new("-").fg(Color::DarkGrey),
            Cell::new(format!("skipped: {}", skipped.reason)).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// Render a grouped aggregate table.
pub fn aggregate_table(aggregates: &AggregateTable) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header: Vec<Cell> = aggregates
        .group_keys
        .iter()
        .map(|key| Cell::new(key).add_attribute(Attribute::Bold))
        .collect();
    header.extend(
        aggregates
            .metric_names
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for row in &aggregates.rows {
        let mut cells: Vec<Cell> = row.keys.iter().map(Cell::new).collect();
        cells.extend(row.values.iter().map(|value| match value {
            Some(v) => Cell::new(format!("{:.2}", v)),
            None => Cell::new("-").fg(Color::DarkGrey),
        }));
        table.add_row(cells);
    }

    table
}

/// Print degradation warnings, one styled line each.
pub fn print_warnings(warnings: &[StageWarning]) {
    for warning in warnings {
        println!(
            "    {} {}",
            style("!").yellow().bold(),
            style(warning.to_string()).yellow()
        );
    }
}
