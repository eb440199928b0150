//! CSV output for flattened report tables.

use std::path::{Path, PathBuf};

use faers_model::Dataset;

pub mod error;
pub mod writer;

pub use error::{OutputError, Result};
pub use writer::{IncrementalCsvWriter, WriteSummary, write_tables};

/// Output file for `dataset` under `dir`, e.g. `data/drugs_2020.csv`.
pub fn output_path(dir: &Path, dataset: Dataset, label: &str) -> PathBuf {
    dir.join(format!("{}_{label}.csv", dataset.file_stem()))
}
