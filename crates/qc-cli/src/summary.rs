use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qc_cli::types::ExtractResult;
use qc_core::NameKind;

pub fn print_summary(result: &ExtractResult) {
    println!("Input: {}", result.input_dir.display());
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Printout"),
        header_cell("Table"),
        header_cell("Name"),
        header_cell("Readings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_readings = 0usize;
    for file in &result.written {
        total_readings += file.populated_cells;
        let table_name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&file.source_file),
            Cell::new(table_name).fg(Color::Blue).add_attribute(Attribute::Bold),
            kind_cell(file.kind),
            Cell::new(file.populated_cells),
        ]);
    }
    for file_name in &result.empty_files {
        table.add_row(vec![
            dim_cell(file_name),
            dim_cell("-"),
            dim_cell("empty"),
            dim_cell(0),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} of {} printouts", result.written.len(), result.processed))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_readings).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !result.collisions.is_empty() {
        eprintln!("Shared output names (later tables overwrite earlier ones):");
        for name in &result.collisions {
            eprintln!("- {name}");
        }
    }
    if result.has_errors() {
        eprintln!("Errors:");
        for failure in &result.read_failures {
            eprintln!("- {}: {}", failure.file_name, failure.message);
        }
        for failure in &result.write_failures {
            eprintln!("- {}: {}", failure.path.display(), failure.message);
        }
    }
}

fn kind_cell(kind: NameKind) -> Cell {
    match kind {
        NameKind::Plain => Cell::new("date"),
        NameKind::Timestamped => Cell::new("date+time").fg(Color::Yellow),
        NameKind::SourceSuffixed => Cell::new("date+source").fg(Color::Yellow),
        NameKind::Undated => Cell::new("undated").fg(Color::Red),
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
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
