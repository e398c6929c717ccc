//! CLI argument definitions for the QC printout extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qc_output::LevelExclusion;

#[derive(Parser)]
#[command(
    name = "qc-extract",
    version,
    about = "Extract QC control readings from lab printouts into per-date CSV tables",
    long_about = "Extract quality-control readings from chemistry analyzer printouts.\n\n\
                  Reads every .txt printout in a folder, keeps the readings between the\n\
                  control-material markers, and writes one ID,ANALITO,NIVEL 1,NIVEL 2,NIVEL 3\n\
                  table per printout, named after the report date."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (always present in json logs).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract a folder of printouts into per-date CSV tables.
    Extract(ExtractArgs),

    /// List the analyte panel.
    Analytes,

    /// Load generated tables back as per-level records.
    Records(RecordsArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Folder containing the .txt printouts.
    #[arg(value_name = "INPUT_DIR", default_value = "Datos_txt")]
    pub input_dir: PathBuf,

    /// Folder for the generated tables (created if missing).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "Plantillas")]
    pub output_dir: PathBuf,

    /// Resolve output names and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Line marker that opens the capture window.
    #[arg(long = "start-marker", value_name = "MARKER")]
    pub start_marker: Option<String>,

    /// Line marker that closes the capture window (repeatable).
    ///
    /// When given, replaces the built-in stop markers entirely.
    #[arg(long = "stop-marker", value_name = "MARKER")]
    pub stop_markers: Vec<String>,

    /// Label that precedes the report date (matched case-insensitively).
    #[arg(long = "date-anchor", value_name = "LABEL")]
    pub date_anchor: Option<String>,
}

#[derive(Parser)]
pub struct RecordsArgs {
    /// Folder containing generated tables.
    #[arg(value_name = "CSV_DIR", default_value = "Plantillas")]
    pub csv_dir: PathBuf,

    /// Keep only this analyte display name (repeatable).
    #[arg(long = "analyte", value_name = "NAME")]
    pub analytes: Vec<String>,

    /// Drop an analyte for one level only, e.g. "3:Colesterol HDL (HDL-C)" (repeatable).
    #[arg(long = "exclude", value_name = "LEVEL:NAME")]
    pub exclusions: Vec<LevelExclusion>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
