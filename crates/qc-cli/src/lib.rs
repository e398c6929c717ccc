//! CLI library components for the QC printout extractor.

pub mod logging;
pub mod pipeline;
pub mod types;
