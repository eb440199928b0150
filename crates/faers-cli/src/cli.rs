//! CLI argument definitions for the report flattener.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "faers",
    version,
    about = "Flatten openFDA adverse-event reports into CSV datasets",
    long_about = "Flatten openFDA drug adverse-event report files into two CSV datasets.\n\n\
                  drugs_<label>.csv holds one row per drug sub-record; \
                  other_<label>.csv holds patient demographics, seriousness and reactions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow patient ids to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flatten a directory of report files into CSV datasets.
    Ingest(IngestArgs),

    /// List the output datasets and their columns.
    Datasets,
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Directory containing report files (may also come from --config).
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// TOML file with default settings for this run.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for CSV files (default: data).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Label used in output file names (default: the year directory, e.g. 2020 for raw/2020/q1).
    #[arg(long = "label")]
    pub label: Option<String>,

    /// File name glob for report files (default: *.json).
    #[arg(long = "pattern")]
    pub pattern: Option<String>,

    /// Datasets to produce.
    #[arg(long = "dataset", value_enum)]
    pub dataset: Option<DatasetArg>,

    /// How multiple reactions map onto the demographics dataset.
    #[arg(long = "reactions", value_enum)]
    pub reactions: Option<ReactionArg>,

    /// Write all tables at the end, or after each source file.
    #[arg(long = "write-mode", value_enum)]
    pub write_mode: Option<WriteModeArg>,

    /// Skip source files that fail to parse instead of aborting.
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Load and flatten without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DatasetArg {
    Drugs,
    Other,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReactionArg {
    First,
    PerReaction,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WriteModeArg {
    Accumulate,
    PerFile,
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
