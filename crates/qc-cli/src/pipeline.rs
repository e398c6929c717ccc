//! Extraction pipeline with explicit stages.
//!
//! 1. **Extract**: build one report per printout, drop empty ones
//! 2. **Name**: assign output names once every report date is known
//! 3. **Output**: write one CSV per named report
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use qc_core::{ExtractOptions, StampSource, find_collisions, process_directory, resolve_output_names};
use qc_output::write_outputs;

use crate::types::ExtractResult;

/// Everything one extraction run needs.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub options: ExtractOptions,
}

/// Runs all stages over `config.input_dir`.
///
/// Unreadable printouts and unwritable tables are collected into the result;
/// only a missing input folder or an uncreatable output folder aborts the run.
pub fn run_extract(config: &ExtractConfig, stamps: &impl StampSource) -> Result<ExtractResult> {
    let span = info_span!("extract", input_dir = %config.input_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let batch = process_directory(&config.input_dir, &config.options)
        .with_context(|| format!("read printouts from {}", config.input_dir.display()))?;

    let assignments = resolve_output_names(&batch.entries, stamps);
    let collisions = find_collisions(&assignments).into_keys().collect();

    let summary = write_outputs(
        &config.output_dir,
        &batch.entries,
        &assignments,
        config.dry_run,
    )
    .with_context(|| format!("prepare output folder {}", config.output_dir.display()))?;

    info!(
        output_dir = %config.output_dir.display(),
        written = summary.written.len(),
        write_failures = summary.failures.len(),
        dry_run = config.dry_run,
        duration_ms = start.elapsed().as_millis(),
        "output stage complete"
    );

    Ok(ExtractResult {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        dry_run: config.dry_run,
        processed: batch.processed(),
        written: summary.written,
        empty_files: batch.empty_files,
        read_failures: batch.failures,
        write_failures: summary.failures,
        collisions,
    })
}
