//! Report building from scanned readings.

use std::path::Path;

use tracing::{debug, warn};

use qc_ingest::{ValueToken, captured_lines, extract_report_date_with_anchor, value_tokens};
use qc_model::{Level, ModelError, Report, ReportDate, normalize_code, registry};

use crate::options::ExtractOptions;

/// What happened to one reading.
#[derive(Debug, PartialEq)]
pub enum TripleOutcome {
    /// Value stored in the report.
    Applied { analyte_id: u32, level: Level },
    /// Normalized code is not on the panel.
    UnknownCode { code: String },
    /// Level digit outside 1..=3.
    InvalidLevel { digit: u8 },
    /// Registry and report table disagree; reading skipped.
    RowMismatch(ModelError),
}

/// Counters collected while building one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub applied: usize,
    pub unknown_codes: usize,
    pub invalid_levels: usize,
    pub row_mismatches: usize,
}

impl BuildStats {
    pub fn discarded(&self) -> usize {
        self.unknown_codes + self.invalid_levels + self.row_mismatches
    }
}

/// Fills a zero-seeded [`Report`] one reading at a time.
#[derive(Debug)]
pub struct ReportBuilder {
    report: Report,
    stats: BuildStats,
}

impl ReportBuilder {
    pub fn new(source_file: impl AsRef<Path>) -> Self {
        Self {
            report: Report::new(source_file.as_ref()),
            stats: BuildStats::default(),
        }
    }

    pub fn set_date(&mut self, date: Option<ReportDate>) {
        self.report.set_date(date);
    }

    /// Applies one `(code, level, value)` reading.
    ///
    /// Later readings for the same analyte and level overwrite earlier ones.
    /// Nothing here is fatal; rejected readings are reported in the outcome.
    pub fn apply_triple(&mut self, raw_code: &str, level_digit: u8, value: f64) -> TripleOutcome {
        let code = normalize_code(raw_code);
        let Some(definition) = registry().lookup(&code) else {
            debug!(raw_code, code = %code, "skipping code outside analyte panel");
            self.stats.unknown_codes += 1;
            return TripleOutcome::UnknownCode { code };
        };

        let level = match Level::from_digit(level_digit) {
            Ok(level) => level,
            Err(_) => {
                debug!(raw_code, level = level_digit, "skipping out-of-range level");
                self.stats.invalid_levels += 1;
                return TripleOutcome::InvalidLevel { digit: level_digit };
            }
        };

        match self.report.set_level(definition.id, level, value) {
            Ok(()) => {
                self.stats.applied += 1;
                TripleOutcome::Applied {
                    analyte_id: definition.id,
                    level,
                }
            }
            Err(error) => {
                warn!(
                    source_file = %self.report.source_file().display(),
                    raw_code,
                    %error,
                    "analyte row lookup failed"
                );
                self.stats.row_mismatches += 1;
                TripleOutcome::RowMismatch(error)
            }
        }
    }

    pub fn apply_token(&mut self, token: &ValueToken<'_>) -> TripleOutcome {
        self.apply_triple(token.raw_code, token.level, token.value)
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Finishes scanning and hands back the report.
    pub fn finish(self) -> (Report, BuildStats) {
        (self.report, self.stats)
    }
}

/// Builds the report for one printout's lines.
///
/// The capture window gates which lines are tokenized; the date is taken
/// from the whole printout independently of the window.
pub fn build_report<S: AsRef<str>>(
    source_file: &Path,
    lines: &[S],
    options: &ExtractOptions,
) -> (Report, BuildStats) {
    let mut builder = ReportBuilder::new(source_file);
    for line in captured_lines(lines, &options.markers) {
        for token in value_tokens(&line) {
            builder.apply_token(&token);
        }
    }
    builder.set_date(extract_report_date_with_anchor(lines, &options.date_anchor));
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_known_code() {
        let mut builder = ReportBuilder::new("a.txt");
        let outcome = builder.apply_triple("CHOL-C", 2, 180.0);
        assert_eq!(
            outcome,
            TripleOutcome::Applied {
                analyte_id: 2,
                level: Level::Two
            }
        );
        assert_eq!(builder.report().row(2).unwrap().level(Level::Two), 180.0);
    }

    #[test]
    fn unknown_code_is_skipped() {
        let mut builder = ReportBuilder::new("a.txt");
        let outcome = builder.apply_triple("XYZ", 1, 10.0);
        assert_eq!(
            outcome,
            TripleOutcome::UnknownCode {
                code: "XYZ".to_string()
            }
        );
        assert!(builder.report().is_empty());
        assert_eq!(builder.stats().unknown_codes, 1);
    }

    #[test]
    fn invalid_level_is_skipped() {
        let mut builder = ReportBuilder::new("a.txt");
        assert_eq!(
            builder.apply_triple("GLU", 4, 10.0),
            TripleOutcome::InvalidLevel { digit: 4 }
        );
        assert_eq!(
            builder.apply_triple("GLU", 0, 10.0),
            TripleOutcome::InvalidLevel { digit: 0 }
        );
        assert!(builder.report().is_empty());
        assert_eq!(builder.stats().discarded(), 2);
    }

    #[test]
    fn last_write_wins() {
        let mut builder = ReportBuilder::new("a.txt");
        builder.apply_triple("GLU", 1, 95.0);
        builder.apply_triple("GLU", 1, 97.5);
        let (report, stats) = builder.finish();
        assert_eq!(report.row(1).unwrap().level(Level::One), 97.5);
        assert_eq!(stats.applied, 2);
    }

    #[test]
    fn build_report_composes_window_tokens_and_date() {
        let lines = [
            "Índice 05/31/2025",
            "GLU - 1 50:",
            "LYPHOCHEK-ASSAYED",
            "GLU - 1 95.0: CHOL-C - 2 180:",
            "QC1 LIQUICHEK URINE",
            "CHOL - 2 999:",
        ];
        let (report, stats) = build_report(Path::new("a.txt"), &lines, &ExtractOptions::default());

        assert_eq!(report.date().unwrap().as_str(), "05_31_2025");
        let glucose = report.row(1).unwrap();
        assert_eq!(glucose.levels(), [95.0, 0.0, 0.0]);
        let cholesterol = report.row(2).unwrap();
        assert_eq!(cholesterol.levels(), [0.0, 180.0, 0.0]);
        assert_eq!(stats.applied, 2);
        assert_eq!(report.populated_cells(), 2);
    }
}
