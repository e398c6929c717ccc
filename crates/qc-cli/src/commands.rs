use anyhow::{Context, Result};
use comfy_table::{CellAlignment, Table};
use tracing::{info_span, warn};

use qc_cli::pipeline::{ExtractConfig, run_extract as run_pipeline};
use qc_cli::types::ExtractResult;
use qc_core::{ExtractOptions, FileCreationTime};
use qc_ingest::{CaptureMarkers, DEFAULT_START_MARKER, DEFAULT_STOP_MARKERS};
use qc_model::registry;
use qc_output::{RecordFilter, collect_level_records};

use crate::cli::{ExtractArgs, RecordsArgs};
use crate::summary::{align_column, apply_table_style};

pub fn run_analytes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Code", "Analyte"]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for definition in registry().definitions() {
        table.add_row(vec![
            definition.id.to_string(),
            definition.code.to_string(),
            definition.name.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractResult> {
    let config = ExtractConfig {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
        options: extract_options(args),
    };
    run_pipeline(&config, &FileCreationTime)
}

fn extract_options(args: &ExtractArgs) -> ExtractOptions {
    let mut options = ExtractOptions::default();
    if args.start_marker.is_some() || !args.stop_markers.is_empty() {
        let start = args.start_marker.as_deref().unwrap_or(DEFAULT_START_MARKER);
        let markers = if args.stop_markers.is_empty() {
            CaptureMarkers::new(start, DEFAULT_STOP_MARKERS)
        } else {
            CaptureMarkers::new(start, &args.stop_markers)
        };
        options = options.with_markers(markers);
    }
    if let Some(anchor) = &args.date_anchor {
        options = options.with_date_anchor(anchor.as_str());
    }
    options
}

pub fn run_records(args: &RecordsArgs) -> Result<()> {
    let span = info_span!("records", csv_dir = %args.csv_dir.display());
    let _guard = span.enter();
    for name in &args.analytes {
        if registry().by_name(name).is_none() {
            warn!(analyte = %name, "not a panel analyte name; no record will match");
        }
    }
    let filter = RecordFilter {
        analytes: args.analytes.clone(),
        exclusions: args.exclusions.clone(),
    };
    let records = collect_level_records(&args.csv_dir, &filter)
        .with_context(|| format!("load tables from {}", args.csv_dir.display()))?;

    let mut table = Table::new();
    table.set_header(vec!["Level", "Analyte", "Date", "Value"]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for record in &records {
        table.add_row(vec![
            record.level.number().to_string(),
            record.analyte.clone(),
            record.date.format("%Y-%m-%d").to_string(),
            record.value.to_string(),
        ]);
    }
    println!("{table}");
    println!("{} record(s)", records.len());
    Ok(())
}
