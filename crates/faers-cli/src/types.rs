use std::path::PathBuf;

use crate::pipeline::DatasetRun;

#[derive(Debug)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub label: String,
    pub dry_run: bool,
    pub datasets: Vec<DatasetRun>,
}

impl RunResult {
    /// True when any source file had to be skipped.
    pub fn has_errors(&self) -> bool {
        self.datasets.iter().any(|run| !run.skipped.is_empty())
    }
}
