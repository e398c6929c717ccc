//! Extraction pipeline for QC printouts.
//!
//! Pass 1 ([`process_batch`]) builds one [`qc_model::Report`] per printout and
//! drops the empty ones. Pass 2 ([`resolve_output_names`]) assigns output file
//! names once every report date in the batch is known.

pub mod batch;
pub mod builder;
pub mod naming;
pub mod options;

pub use batch::{BatchEntry, BatchResult, FileFailure, process_batch, process_directory, process_file};
pub use builder::{BuildStats, ReportBuilder, TripleOutcome, build_report};
pub use naming::{
    FileCreationTime, FilenameAssignment, NameKind, StampSource, find_collisions,
    resolve_output_names,
};
pub use options::ExtractOptions;
