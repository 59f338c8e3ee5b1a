use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vessel_cli::pipeline::{BatchResult, LoadStatus};
use vessel_model::RecordStatus;

pub fn print_summary(result: &BatchResult) {
    let report = &result.report;
    println!("Input: {}", result.input.display());
    println!("Report: {}", result.report_path.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (status, color) in [
        (RecordStatus::Valid, Color::Green),
        (RecordStatus::Warning, Color::Yellow),
        (RecordStatus::Error, Color::Red),
    ] {
        table.add_row(vec![
            Cell::new(status.as_str()).fg(color),
            count_cell(report.count(status), color),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_issue_table(result);

    println!(
        "Acceptance rate: {:.1}% (threshold {:.1}%)",
        report.validation_rate * 100.0,
        result.threshold * 100.0
    );
    if !result.duplicates.is_empty() {
        println!("Duplicate groups: {}", result.duplicates.len());
    }
    match &result.load {
        LoadStatus::Loaded(summary) => {
            println!("Staging: {} rows written", summary.written);
        }
        LoadStatus::Refused {
            accepted, total, ..
        } => {
            eprintln!("Staging refused: only {accepted} of {total} records accepted");
        }
        LoadStatus::Skipped { threshold_met } => {
            let verdict = if *threshold_met { "would load" } else { "would be refused" };
            println!("Staging skipped (dry run): batch {verdict}");
        }
    }
}

fn print_issue_table(result: &BatchResult) {
    let report = &result.report;
    if report.errors_by_type.is_empty() && report.warnings_by_type.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Issue"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (kind, count) in &report.errors_by_type {
        table.add_row(vec![
            Cell::new("ERROR").fg(Color::Red),
            Cell::new(kind.as_str()),
            count_cell(*count, Color::Red),
        ]);
    }
    for (kind, count) in &report.warnings_by_type {
        table.add_row(vec![
            Cell::new("WARN").fg(Color::Yellow),
            Cell::new(kind.as_str()),
            count_cell(*count, Color::Yellow),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
