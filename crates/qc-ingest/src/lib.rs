//! QC printout ingestion.
//!
//! Turns a folder of instrument printouts into line streams and pulls the
//! raw pieces out of them:
//!
//! - **Discovery**: list `.txt` printouts in a deterministic order
//! - **Decoding**: read legacy single-byte (Latin-1) text
//! - **Capture window**: gate lines between the start and stop markers
//! - **Tokens**: find `CODE - LEVEL VALUE:` readings on a line
//! - **Date**: find the report date after the `Índice` label
//!
//! # Example
//!
//! ```ignore
//! use qc_ingest::{CaptureMarkers, captured_lines, read_report_lines, value_tokens};
//!
//! let lines = read_report_lines(path)?;
//! let markers = CaptureMarkers::default();
//! for line in captured_lines(&lines, &markers) {
//!     for token in value_tokens(&line) {
//!         println!("{} {} {}", token.raw_code, token.level, token.value);
//!     }
//! }
//! ```

mod capture;
mod date;
mod discovery;
mod error;
mod reader;
mod tokens;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{list_report_files, report_file_name};

// === Decoding ===
pub use reader::{decode_report, read_report_lines};

// === Line Scanning ===
pub use capture::{
    CaptureMarkers, CaptureWindow, DEFAULT_START_MARKER, DEFAULT_STOP_MARKERS, LineAction,
    WindowState, captured_lines,
};
pub use date::{DEFAULT_DATE_ANCHOR, extract_report_date, extract_report_date_with_anchor};
pub use tokens::{ValueToken, value_tokens};
