//! Reading generated tables back as per-level records.
//!
//! This is the loading side used by data-entry tooling: every dated output
//! table is flattened into `(date, level, analyte, value)` records, with zero
//! cells treated as "no reading".

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use qc_model::{Level, ReportDate, registry};

use crate::error::{OutputError, Result};

/// `MM_DD_YYYY.csv` or `MM_DD_YYYY_HHMM.csv`.
static OUTPUT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}_\d{2}_\d{4})(?:_(\d{4}))?\.csv$").expect("Invalid output name regex")
});

/// Date (and optional time suffix) decoded from an output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    pub date: NaiveDate,
    pub time: Option<String>,
}

/// Parses a dated output file name. Other names, including undated
/// fallbacks and impossible dates, yield `None`.
pub fn parse_output_name(file_name: &str) -> Option<OutputName> {
    let caps = OUTPUT_NAME_REGEX.captures(file_name)?;
    let date = ReportDate::from_token(caps.get(1)?.as_str())?.calendar_date()?;
    Some(OutputName {
        date,
        time: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

/// One row of a generated table. Level cells are kept as text so a
/// malformed cell only drops that cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultTableRow {
    #[serde(rename = "ID")]
    pub id: Option<u32>,
    #[serde(rename = "ANALITO")]
    pub analyte: String,
    #[serde(rename = "NIVEL 1", default)]
    pub level_1: String,
    #[serde(rename = "NIVEL 2", default)]
    pub level_2: String,
    #[serde(rename = "NIVEL 3", default)]
    pub level_3: String,
}

impl ResultTableRow {
    fn cell(&self, level: Level) -> &str {
        match level {
            Level::One => &self.level_1,
            Level::Two => &self.level_2,
            Level::Three => &self.level_3,
        }
    }

    /// Parsed reading for `level`; `None` for blank, malformed, or zero cells.
    pub fn reading(&self, level: Level) -> Option<f64> {
        let value: f64 = self.cell(level).trim().parse().ok()?;
        (value != 0.0).then_some(value)
    }
}

/// Reads one generated table.
pub fn read_result_table(path: &Path) -> Result<Vec<ResultTableRow>> {
    let to_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(to_error)?;
    reader
        .deserialize()
        .collect::<csv::Result<Vec<ResultTableRow>>>()
        .map_err(to_error)
}

/// One non-zero reading from a dated table.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRecord {
    pub date: NaiveDate,
    pub level: Level,
    pub analyte: String,
    pub value: f64,
}

/// An analyte a control level does not carry, e.g. `3:Colesterol HDL (HDL-C)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelExclusion {
    pub level: Level,
    pub analyte: String,
}

impl FromStr for LevelExclusion {
    type Err = OutputError;

    /// Parses `LEVEL:NAME`, where `NAME` must be a panel display name.
    fn from_str(value: &str) -> Result<Self> {
        let invalid = |reason: &str| OutputError::InvalidExclusion {
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let (level, name) = value
            .split_once(':')
            .ok_or_else(|| invalid("expected LEVEL:NAME"))?;
        let level = level
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|digit| Level::from_digit(digit).ok())
            .ok_or_else(|| invalid("level must be 1, 2 or 3"))?;
        let definition = registry()
            .by_name(name.trim())
            .ok_or_else(|| invalid("unknown analyte name"))?;
        Ok(Self {
            level,
            analyte: definition.name.to_string(),
        })
    }
}

/// Which readings survive flattening.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Display names to keep; empty keeps every analyte.
    pub analytes: Vec<String>,
    /// Analytes dropped for one level only.
    pub exclusions: Vec<LevelExclusion>,
}

impl RecordFilter {
    pub fn keeps(&self, level: Level, analyte: &str) -> bool {
        if !self.analytes.is_empty() && !self.analytes.iter().any(|name| name == analyte) {
            return false;
        }
        !self
            .exclusions
            .iter()
            .any(|exclusion| exclusion.level == level && exclusion.analyte == analyte)
    }
}

/// Flattens every dated table in `dir` into records.
///
/// Records are ordered by level, then analyte, then most recent date first.
/// Tables that cannot be parsed are logged and skipped.
///
/// # Errors
///
/// Returns an error if `dir` cannot be listed.
pub fn collect_level_records(dir: &Path, filter: &RecordFilter) -> Result<Vec<LevelRecord>> {
    let read_error = |source| OutputError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut tables: Vec<(PathBuf, NaiveDate)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match parse_output_name(name) {
            Some(parsed) => tables.push((path.clone(), parsed.date)),
            None => debug!(file = name, "not a dated output table; skipped"),
        }
    }
    tables.sort();

    let mut records = Vec::new();
    for (path, date) in tables {
        let rows = match read_result_table(&path) {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "skipping unreadable output table");
                continue;
            }
        };
        for row in rows {
            for level in Level::ALL {
                if !filter.keeps(level, &row.analyte) {
                    continue;
                }
                if let Some(value) = row.reading(level) {
                    records.push(LevelRecord {
                        date,
                        level,
                        analyte: row.analyte.clone(),
                        value,
                    });
                }
            }
        }
    }

    records.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.analyte.cmp(&b.analyte))
            .then_with(|| b.date.cmp(&a.date))
    });
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamped_names() {
        let plain = parse_output_name("05_31_2025.csv").unwrap();
        assert_eq!(plain.date, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
        assert!(plain.time.is_none());

        let stamped = parse_output_name("05_31_2025_0930.csv").unwrap();
        assert_eq!(stamped.time.as_deref(), Some("0930"));
    }

    #[test]
    fn rejects_other_names() {
        assert!(parse_output_name("printout.csv").is_none());
        assert!(parse_output_name("13_45_2025.csv").is_none());
        assert!(parse_output_name("05_31_2025.txt").is_none());
        assert!(parse_output_name("05_31_2025_0930_x.csv").is_none());
    }

    #[test]
    fn zero_and_malformed_cells_are_absent() {
        let row = ResultTableRow {
            id: Some(1),
            analyte: "Glucosa".to_string(),
            level_1: "95.0".to_string(),
            level_2: "0.0".to_string(),
            level_3: "n/a".to_string(),
        };
        assert_eq!(row.reading(Level::One), Some(95.0));
        assert_eq!(row.reading(Level::Two), None);
        assert_eq!(row.reading(Level::Three), None);
    }

    #[test]
    fn parses_level_exclusions() {
        let exclusion: LevelExclusion = "3: Colesterol HDL (HDL-C)".parse().unwrap();
        assert_eq!(exclusion.level, Level::Three);
        assert_eq!(exclusion.analyte, "Colesterol HDL (HDL-C)");

        assert!("Colesterol HDL (HDL-C)".parse::<LevelExclusion>().is_err());
        assert!("4:Glucosa".parse::<LevelExclusion>().is_err());
        assert!("1:Glucose".parse::<LevelExclusion>().is_err());
    }

    #[test]
    fn exclusion_only_drops_its_level() {
        let filter = RecordFilter {
            analytes: Vec::new(),
            exclusions: vec!["3:Colesterol HDL (HDL-C)".parse().unwrap()],
        };
        assert!(filter.keeps(Level::One, "Colesterol HDL (HDL-C)"));
        assert!(!filter.keeps(Level::Three, "Colesterol HDL (HDL-C)"));
        assert!(filter.keeps(Level::Three, "Glucosa"));
    }
}
