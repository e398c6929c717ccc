//! Data model for QC printout extraction.
//!
//! Holds the fixed analyte panel, code normalization, control levels, and
//! the per-file result table that extraction fills in.

pub mod analyte;
pub mod code;
pub mod date;
pub mod error;
pub mod level;
pub mod report;

pub use analyte::{AnalyteDefinition, AnalyteRegistry, registry};
pub use code::normalize_code;
pub use date::ReportDate;
pub use error::{ModelError, Result};
pub use level::Level;
pub use report::{Report, ResultRow};
