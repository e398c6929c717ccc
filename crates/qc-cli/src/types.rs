use std::path::PathBuf;

use qc_core::FileFailure;
use qc_output::{OutputFile, WriteFailure};

#[derive(Debug)]
pub struct ExtractResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub processed: usize,
    pub written: Vec<OutputFile>,
    /// Printouts whose capture window held no reading.
    pub empty_files: Vec<String>,
    pub read_failures: Vec<FileFailure>,
    pub write_failures: Vec<WriteFailure>,
    /// Output names shared by more than one printout.
    pub collisions: Vec<String>,
}

impl ExtractResult {
    pub fn has_errors(&self) -> bool {
        !self.read_failures.is_empty() || !self.write_failures.is_empty()
    }
}
