//! Batch processing over a folder of printouts (pass 1).

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use qc_ingest::{list_report_files, read_report_lines, report_file_name};
use qc_model::{Report, ReportDate};

use crate::builder::{BuildStats, build_report};
use crate::options::ExtractOptions;

/// A printout that produced at least one reading.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub file_name: String,
    pub file_path: PathBuf,
    pub report: Report,
    pub stats: BuildStats,
}

impl BatchEntry {
    pub fn date(&self) -> Option<&ReportDate> {
        self.report.date()
    }
}

/// A printout that could not be read.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_name: String,
    pub file_path: PathBuf,
    pub message: String,
}

/// Outcome of pass 1.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Non-empty reports, in processing order.
    pub entries: Vec<BatchEntry>,
    /// Printouts whose capture window held no non-zero reading.
    pub empty_files: Vec<String>,
    /// Printouts skipped because they could not be read.
    pub failures: Vec<FileFailure>,
}

impl BatchResult {
    pub fn processed(&self) -> usize {
        self.entries.len() + self.empty_files.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Reads one printout and builds its report.
///
/// # Errors
///
/// Returns the read or decode error; callers decide whether to continue.
pub fn process_file(path: &Path, options: &ExtractOptions) -> qc_ingest::Result<(Report, BuildStats)> {
    let lines = read_report_lines(path)?;
    Ok(build_report(path, &lines, options))
}

/// Processes printouts in file-name order.
///
/// Per-file failures are logged and collected; they never abort the batch.
/// Empty reports are dropped even if they carry a date.
pub fn process_batch(files: &[PathBuf], options: &ExtractOptions) -> BatchResult {
    let mut ordered: Vec<&PathBuf> = files.iter().collect();
    ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut result = BatchResult::default();
    for path in ordered {
        let file_name = report_file_name(path);
        let span = info_span!("report", file = %file_name);
        let _guard = span.enter();

        let (report, stats) = match process_file(path, options) {
            Ok(built) => built,
            Err(error) => {
                warn!(%error, "skipping unreadable printout");
                result.failures.push(FileFailure {
                    file_name,
                    file_path: path.clone(),
                    message: error.to_string(),
                });
                continue;
            }
        };

        if report.is_empty() {
            debug!(
                date = report.date().map(ReportDate::as_str),
                discarded = stats.discarded(),
                "no readings captured; report discarded"
            );
            result.empty_files.push(file_name);
            continue;
        }

        debug!(
            date = report.date().map(ReportDate::as_str),
            applied = stats.applied,
            discarded = stats.discarded(),
            "report built"
        );
        result.entries.push(BatchEntry {
            file_name,
            file_path: path.clone(),
            report,
            stats,
        });
    }
    result
}

/// Lists the printouts in `dir` and processes them.
///
/// # Errors
///
/// A missing or unreadable input directory is fatal and is returned before
/// any printout is processed.
pub fn process_directory(dir: &Path, options: &ExtractOptions) -> qc_ingest::Result<BatchResult> {
    let files = list_report_files(dir)?;
    let start = Instant::now();
    let result = process_batch(&files, options);
    info!(
        input_dir = %dir.display(),
        file_count = files.len(),
        report_count = result.entries.len(),
        empty_count = result.empty_files.len(),
        failure_count = result.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn orders_by_file_name_and_drops_empty_reports() {
        let dir = TempDir::new().unwrap();
        let b = write(dir.path(), "b.txt", "LYPHOCHEK-ASSAYED\nGLU - 1 95:\n");
        let a = write(dir.path(), "a.txt", "LYPHOCHEK-ASSAYED\nGLU - 2 90:\n");
        let empty = write(dir.path(), "c.txt", "Índice 05/31/2025\nGLU - 1 95:\n");

        let result = process_batch(&[b, empty, a], &ExtractOptions::default());

        let names: Vec<&str> = result.entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(result.empty_files, vec!["c.txt".to_string()]);
        assert_eq!(result.processed(), 3);
        assert!(!result.has_failures());
    }

    #[test]
    fn unreadable_file_does_not_abort_batch() {
        let dir = TempDir::new().unwrap();
        let good = write(dir.path(), "good.txt", "LYPHOCHEK-ASSAYED\nK - 1 4.2:\n");
        let missing = dir.path().join("gone.txt");

        let result = process_batch(&[missing, good], &ExtractOptions::default());

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].file_name, "gone.txt");
    }
}
