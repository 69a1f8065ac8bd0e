use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use imdb_core::TableDefinition;
use imdb_model::{RunReport, TableReport};

pub fn print_summary(report: &RunReport, output_dir: &Path) {
    println!("Output: {}", output_dir.display());
    println!("{}", summary_table(report));
    println!("Finished in {}", format_duration(report.duration_ms));
}

/// One row per table written, followed by a total line.
pub fn summary_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Files"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &report.tables {
        table.add_row(vec![
            Cell::new(entry.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.rows),
            Cell::new(entry.partitions.len()),
            output_cell(entry),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        Cell::new(report.total_partitions()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// The output tables in pipeline order, with their sources.
pub fn listing_table(definitions: &[TableDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Source", "Lookup", "Batched", "Description"]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for definition in definitions {
        let lookup = definition
            .lookup
            .as_ref()
            .map_or_else(|| dim_cell("-"), |lookup| Cell::new(lookup.source));
        let batched = if definition.batched {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("no")
        };
        table.add_row(vec![
            Cell::new(definition.table),
            Cell::new(definition.source),
            lookup,
            batched,
            Cell::new(definition.description),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// File name for single-file tables, a range for partitioned ones.
fn output_cell(entry: &TableReport) -> Cell {
    let names: Vec<String> = entry
        .partitions
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    match names.as_slice() {
        [] => dim_cell("-"),
        [single] => Cell::new(single),
        [first, .., last] => Cell::new(format!("{first} .. {last}")),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn format_duration(duration_ms: u128) -> String {
    if duration_ms < 1_000 {
        format!("{duration_ms} ms")
    } else {
        let seconds = duration_ms / 1_000;
        let millis = duration_ms % 1_000;
        if seconds < 60 {
            format!("{seconds}.{:01} s", millis / 100)
        } else {
            format!("{}m {:02}s", seconds / 60, seconds % 60)
        }
    }
}
