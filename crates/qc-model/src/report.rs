//! Per-file result table.

use std::path::{Path, PathBuf};

use crate::analyte::{AnalyteDefinition, registry};
use crate::date::ReportDate;
use crate::error::{ModelError, Result};
use crate::level::Level;

/// One analyte row with its three control-level readings.
///
/// A level value of `0.0` means "no reading".
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub analyte_id: u32,
    pub analyte_name: &'static str,
    levels: [f64; 3],
}

impl ResultRow {
    fn seeded(definition: &AnalyteDefinition) -> Self {
        Self {
            analyte_id: definition.id,
            analyte_name: definition.name,
            levels: [0.0; 3],
        }
    }

    pub fn level(&self, level: Level) -> f64 {
        self.levels[level.index()]
    }

    pub fn levels(&self) -> [f64; 3] {
        self.levels
    }

    pub fn total(&self) -> f64 {
        self.levels.iter().sum()
    }
}

/// Extraction result for one printout.
///
/// Rows are seeded from the registry (one per analyte, ascending id) and the
/// table never grows or shrinks; extraction only overwrites level values.
#[derive(Debug, Clone)]
pub struct Report {
    source_file: PathBuf,
    date: Option<ReportDate>,
    rows: Vec<ResultRow>,
}

impl Report {
    /// Creates a zero-filled table for `source_file`.
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        let rows = registry()
            .definitions()
            .iter()
            .map(ResultRow::seeded)
            .collect();
        Self {
            source_file: source_file.into(),
            date: None,
            rows,
        }
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn date(&self) -> Option<&ReportDate> {
        self.date.as_ref()
    }

    pub fn set_date(&mut self, date: Option<ReportDate>) {
        self.date = date;
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn row(&self, analyte_id: u32) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.analyte_id == analyte_id)
    }

    /// Overwrites one level of one analyte.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RowLookup`] unless exactly one row carries
    /// `analyte_id`. The table is left untouched in that case.
    pub fn set_level(&mut self, analyte_id: u32, level: Level, value: f64) -> Result<()> {
        let index = self.locate_row(analyte_id)?;
        self.rows[index].levels[level.index()] = value;
        Ok(())
    }

    fn locate_row(&self, analyte_id: u32) -> Result<usize> {
        let mut matches = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.analyte_id == analyte_id)
            .map(|(index, _)| index);
        match (matches.next(), matches.count()) {
            (Some(index), 0) => Ok(index),
            (first, rest) => Err(ModelError::RowLookup {
                analyte_id,
                matches: usize::from(first.is_some()) + rest,
            }),
        }
    }

    /// Sum of every level across every row.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(ResultRow::total).sum()
    }

    /// Number of level cells holding a reading.
    pub fn populated_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.levels)
            .filter(|value| *value != 0.0)
            .count()
    }

    /// True when no reading was captured at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0.0
    }
}
