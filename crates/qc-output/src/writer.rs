//! CSV output for extracted reports.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use qc_core::{BatchEntry, FilenameAssignment, NameKind};
use qc_model::{Level, Report};

use crate::error::{OutputError, Result};

fn header() -> Vec<&'static str> {
    let mut columns = vec!["ID", "ANALITO"];
    columns.extend(Level::ALL.map(Level::column_name));
    columns
}

fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, report: &Report) -> csv::Result<()> {
    writer.write_record(header())?;
    for row in report.rows() {
        let [level_1, level_2, level_3] = row.levels();
        writer.serialize((row.analyte_id, row.analyte_name, level_1, level_2, level_3))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a report table to `path` as UTF-8 CSV.
pub fn write_report_csv(path: &Path, report: &Report) -> Result<()> {
    let to_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_error)?;
    write_rows(&mut writer, report).map_err(to_error)
}

/// A written (or, in a dry run, planned) output table.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub source_file: String,
    pub path: PathBuf,
    pub kind: NameKind,
    pub populated_cells: usize,
}

/// An output table that could not be written.
#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub source_file: String,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct OutputSummary {
    pub written: Vec<OutputFile>,
    pub failures: Vec<WriteFailure>,
    pub dry_run: bool,
}

/// Writes one CSV per assignment into `output_dir`.
///
/// A failed write is logged and recorded; the remaining tables are still
/// written. With `dry_run` nothing touches the filesystem.
///
/// # Errors
///
/// Returns an error only if `output_dir` cannot be created.
pub fn write_outputs(
    output_dir: &Path,
    entries: &[BatchEntry],
    assignments: &[FilenameAssignment],
    dry_run: bool,
) -> Result<OutputSummary> {
    if !dry_run {
        std::fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let mut summary = OutputSummary {
        dry_run,
        ..OutputSummary::default()
    };
    for assignment in assignments {
        let Some(entry) = entries.get(assignment.entry_index) else {
            continue;
        };
        let path = output_dir.join(&assignment.file_name);
        if !dry_run {
            if let Err(err) = write_report_csv(&path, &entry.report) {
                error!(
                    source_file = %entry.file_name,
                    output = %path.display(),
                    error = %err,
                    "failed to write output table"
                );
                summary.failures.push(WriteFailure {
                    source_file: entry.file_name.clone(),
                    path,
                    message: err.to_string(),
                });
                continue;
            }
            info!(source_file = %entry.file_name, output = %assignment.file_name, "wrote output table");
        } else {
            debug!(source_file = %entry.file_name, output = %assignment.file_name, "dry run; not written");
        }
        summary.written.push(OutputFile {
            source_file: entry.file_name.clone(),
            path,
            kind: assignment.kind,
            populated_cells: entry.report.populated_cells(),
        });
    }
    Ok(summary)
}
