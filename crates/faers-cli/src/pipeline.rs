//! Report flattening pipeline with explicit stages.
//!
//! For each dataset the pipeline runs:
//! 1. **Load**: parse each source file into reports with patient ids
//! 2. **Project**: flatten every report into a table for the dataset
//! 3. **Write**: append the tables to the dataset's CSV, header once
//!
//! Files are processed strictly in order. In [`WriteMode::Accumulate`] every
//! table is held until all files are projected; [`WriteMode::PerFile`] writes
//! each file's tables as soon as they are ready.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use faers_ingest::{PatidScheme, list_report_files, load_reports};
use faers_model::{Dataset, FlatTable, ReactionPolicy};
use faers_output::{IncrementalCsvWriter, output_path};
use faers_transform::project;
use serde::Deserialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::config::IngestConfig;
use crate::logging::redact_value;
use crate::types::RunResult;

/// When projected tables are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Hold every table in memory and write once all files are projected.
    #[default]
    Accumulate,
    /// Write each file's tables as soon as the file is projected.
    PerFile,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accumulate => f.write_str("accumulate"),
            Self::PerFile => f.write_str("per-file"),
        }
    }
}

/// Settings shared by every dataset in a run.
#[derive(Debug, Clone)]
pub struct PipelineOptions<'a> {
    pub output_dir: &'a Path,
    pub label: &'a str,
    pub reactions: ReactionPolicy,
    pub write_mode: WriteMode,
    pub skip_malformed: bool,
    pub dry_run: bool,
    pub patid: &'a PatidScheme,
}

/// A source file that was skipped because it could not be loaded.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of running one dataset.
#[derive(Debug, Clone)]
pub struct DatasetRun {
    pub dataset: Dataset,
    /// Output CSV, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub files: usize,
    pub reports: usize,
    /// Reports that projected to zero rows (drug reports without drugs).
    pub empty_reports: usize,
    pub rows: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Enumerates the input directory once and runs every configured dataset.
pub fn run_ingest(config: &IngestConfig) -> Result<RunResult> {
    let span = info_span!("ingest", label = %config.label);
    let _guard = span.enter();

    let files = list_report_files(&config.input_dir, &config.pattern)
        .with_context(|| format!("list report files in {}", config.input_dir.display()))?;
    info!(
        input = %config.input_dir.display(),
        files = files.len(),
        reactions = %config.reactions,
        write_mode = %config.write_mode,
        "discovered source files"
    );
    if files.is_empty() {
        warn!(pattern = %config.pattern, "no source files matched");
    }

    let options = PipelineOptions {
        output_dir: &config.output_dir,
        label: &config.label,
        reactions: config.reactions,
        write_mode: config.write_mode,
        skip_malformed: config.skip_malformed,
        dry_run: config.dry_run,
        patid: &config.patid,
    };
    let datasets = config
        .datasets
        .iter()
        .map(|dataset| run_dataset(*dataset, &files, &options))
        .collect::<Result<Vec<_>>>()?;

    Ok(RunResult {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        label: config.label.clone(),
        dry_run: config.dry_run,
        datasets,
    })
}

/// Loads, projects and writes every file in `files` for `dataset`.
///
/// A malformed source aborts the dataset unless `skip_malformed` is set.
pub fn run_dataset(
    dataset: Dataset,
    files: &[PathBuf],
    options: &PipelineOptions<'_>,
) -> Result<DatasetRun> {
    let span = info_span!("dataset", dataset = %dataset);
    let _guard = span.enter();
    let start = Instant::now();

    let path = output_path(options.output_dir, dataset, options.label);
    let mut writer =
        (!options.dry_run).then(|| IncrementalCsvWriter::with_header(&path, dataset.header()));
    let mut pending: Vec<FlatTable> = Vec::new();
    let mut run = DatasetRun {
        dataset,
        output: None,
        files: 0,
        reports: 0,
        empty_reports: 0,
        rows: 0,
        skipped: Vec::new(),
    };

    for file in files {
        let records = match load_reports(file, options.patid) {
            Ok(records) => records,
            Err(error) if options.skip_malformed && error.is_malformed_source() => {
                warn!(path = %file.display(), %error, "skipping malformed source");
                run.skipped.push(SkippedFile {
                    path: file.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
            Err(error) => {
                return Err(error).with_context(|| format!("load {}", file.display()));
            }
        };

        run.files += 1;
        run.reports += records.len();
        let mut file_tables = Vec::with_capacity(records.len());
        for record in &records {
            let table = project(dataset, record, options.reactions);
            trace!(
                patid = redact_value(record.patid.as_str()),
                rows = table.len(),
                "projected report"
            );
            if table.is_empty() {
                run.empty_reports += 1;
                continue;
            }
            run.rows += table.len();
            file_tables.push(table);
        }
        debug!(
            path = %file.display(),
            reports = records.len(),
            tables = file_tables.len(),
            "projected file"
        );

        match (options.write_mode, writer.as_mut()) {
            (WriteMode::PerFile, Some(writer)) => append_all(writer, &file_tables)?,
            (WriteMode::Accumulate, Some(_)) => pending.extend(file_tables),
            (_, None) => {}
        }
    }

    if let Some(mut writer) = writer {
        append_all(&mut writer, &pending)?;
        let summary = writer
            .finish()
            .with_context(|| format!("finish {}", path.display()))?;
        run.output = Some(summary.path);
    }

    info!(
        files = run.files,
        reports = run.reports,
        rows = run.rows,
        skipped = run.skipped.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "dataset complete"
    );
    Ok(run)
}

fn append_all(writer: &mut IncrementalCsvWriter, tables: &[FlatTable]) -> Result<()> {
    for table in tables {
        writer
            .append(table)
            .with_context(|| format!("write {}", writer.path().display()))?;
    }
    Ok(())
}
