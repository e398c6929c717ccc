//! Output generation for extracted QC reports.
//!
//! Writes one `ID,ANALITO,NIVEL 1,NIVEL 2,NIVEL 3` table per report and
//! reads those tables back as flat per-level records.

mod error;
mod records;
mod writer;

pub use error::{OutputError, Result};
pub use records::{
    LevelExclusion, LevelRecord, OutputName, RecordFilter, ResultTableRow, collect_level_records,
    parse_output_name, read_result_table,
};
pub use writer::{
    OutputFile, OutputSummary, WriteFailure, write_outputs, write_report_csv,
};
