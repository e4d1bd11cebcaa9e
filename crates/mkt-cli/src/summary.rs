//! Run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::StageOutcome;

pub fn print_summary(outcome: &StageOutcome) {
    println!("Stage: {}", outcome.stage);
    if let Some(input) = &outcome.input {
        println!("Input: {}", input.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Rows in"), Cell::new(outcome.rows_in)]);
    table.add_row(vec![Cell::new("Rows out"), Cell::new(outcome.rows_out)]);
    if let Some(report) = &outcome.report {
        table.add_row(vec![
            Cell::new("Duplicates removed"),
            count_cell(report.rows_deduped),
        ]);
        table.add_row(vec![
            Cell::new("Values repaired"),
            count_cell(report.values_repaired),
        ]);
        for (rule, count) in &report.rows_dropped_by_rule {
            table.add_row(vec![
                Cell::new(format!("Dropped: {rule}")),
                Cell::new(*count).fg(Color::Red),
            ]);
        }
    }
    println!("{table}");

    println!("Parquet: {}", outcome.paths.parquet.display());
    println!("CSV: {}", outcome.paths.csv.display());
    if let Some(report_path) = &outcome.report_path {
        println!("Report: {}", report_path.display());
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: u64) -> Cell {
    if value > 0 {
        Cell::new(value).fg(Color::Yellow)
    } else {
        Cell::new(value).fg(Color::DarkGrey)
    }
}
