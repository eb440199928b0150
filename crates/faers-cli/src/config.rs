//! Run configuration: defaults, an optional TOML file, and CLI overrides.
//!
//! Precedence is CLI flag, then config file, then built-in default.
//!
//! ```toml
//! input_dir = "raw/2020/q1"
//! output_dir = "data"
//! label = "2020"
//! datasets = ["drugs", "demographics"]
//! reactions = "first"
//! write_mode = "accumulate"
//!
//! [patid]
//! trailing_components = 3
//! split_component = 2
//! split_delimiter = "-"
//! split_index = 2
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use faers_ingest::{DEFAULT_PATTERN, PatidScheme};
use faers_model::{Dataset, ReactionPolicy};
use serde::Deserialize;

use crate::pipeline::WriteMode;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Keys accepted in a config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub label: Option<String>,
    pub pattern: Option<String>,
    pub datasets: Option<Vec<Dataset>>,
    pub reactions: Option<ReactionPolicy>,
    pub write_mode: Option<WriteMode>,
    pub skip_malformed: Option<bool>,
    pub patid: Option<PatidScheme>,
}

/// Loads a TOML config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse config {}", path.display()))
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub label: Option<String>,
    pub pattern: Option<String>,
    pub datasets: Option<Vec<Dataset>>,
    pub reactions: Option<ReactionPolicy>,
    pub write_mode: Option<WriteMode>,
    pub skip_malformed: bool,
    pub dry_run: bool,
}

/// Fully resolved settings for one ingest run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub label: String,
    pub pattern: String,
    pub datasets: Vec<Dataset>,
    pub reactions: ReactionPolicy,
    pub write_mode: WriteMode,
    pub skip_malformed: bool,
    pub dry_run: bool,
    pub patid: PatidScheme,
}

impl IngestConfig {
    /// Merges CLI overrides over file values over defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let Some(input_dir) = overrides.input_dir.or(file.input_dir) else {
            bail!("no input directory given on the command line or in the config file");
        };
        let label = match overrides.label.or(file.label) {
            Some(label) => label,
            None => default_label(&input_dir)?,
        };
        let mut datasets = overrides
            .datasets
            .or(file.datasets)
            .unwrap_or_else(|| Dataset::ALL.to_vec());
        datasets.sort();
        datasets.dedup();

        Ok(Self {
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            label,
            pattern: overrides
                .pattern
                .or(file.pattern)
                .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            datasets,
            reactions: overrides.reactions.or(file.reactions).unwrap_or_default(),
            write_mode: overrides.write_mode.or(file.write_mode).unwrap_or_default(),
            skip_malformed: overrides.skip_malformed || file.skip_malformed.unwrap_or(false),
            dry_run: overrides.dry_run,
            patid: file.patid.unwrap_or_default(),
            input_dir,
        })
    }
}

/// The year directory of the input, e.g. `2020` for both `raw/2020/q1` and
/// `raw/2020`.
///
/// A quarter leaf (`q1`..`q4`) is skipped in favour of its parent; any other
/// leaf is used as is.
fn default_label(input_dir: &Path) -> Result<String> {
    let label = match dir_name(input_dir) {
        Some(leaf) if is_quarter(leaf) => input_dir.parent().and_then(dir_name).or(Some(leaf)),
        leaf => leaf,
    };
    label.map(str::to_string).with_context(|| {
        format!(
            "cannot derive an output label from {}; pass --label",
            input_dir.display()
        )
    })
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
}

fn is_quarter(name: &str) -> bool {
    matches!(name.to_ascii_lowercase().as_str(), "q1" | "q2" | "q3" | "q4")
}
