use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use faers_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    if result.dry_run {
        println!("Output: (dry run, nothing written)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Files"),
        header_cell("Reports"),
        header_cell("Empty"),
        header_cell("Rows"),
        header_cell("Skipped"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_rows = 0usize;
    for run in &result.datasets {
        total_rows += run.rows;
        table.add_row(vec![
            Cell::new(run.dataset.file_stem())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(run.files),
            Cell::new(run.reports),
            count_cell(run.empty_reports, Color::DarkGrey),
            Cell::new(run.rows),
            count_cell(run.skipped.len(), Color::Red),
            output_cell(run.output.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell(&result.label),
    ]);
    println!("{table}");
    print_skipped(result);
}

fn print_skipped(result: &RunResult) {
    // Every dataset reads the same files, so report each path once.
    let Some(run) = result.datasets.iter().find(|run| !run.skipped.is_empty()) else {
        return;
    };
    eprintln!("Skipped files:");
    for skipped in &run.skipped {
        eprintln!("- {}: {}", skipped.path.display(), skipped.reason);
    }
}

fn output_cell(path: Option<&Path>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
