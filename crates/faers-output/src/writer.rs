//! Header-once CSV writer.
//!
//! The first table appended truncates the target and writes the header; every
//! later table is appended as data rows only. After N appends the file holds
//! exactly one header line followed by all rows in input order.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use faers_model::FlatTable;
use tracing::{debug, warn};

use crate::error::{OutputError, Result};

/// Counts reported once a writer is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub tables: usize,
    pub rows: usize,
}

/// Appends flat tables to a single CSV file.
#[derive(Debug)]
pub struct IncrementalCsvWriter {
    path: PathBuf,
    header: Option<Vec<String>>,
    started: bool,
    tables: usize,
    rows: usize,
}

impl IncrementalCsvWriter {
    /// Writer whose header is taken from the first appended table.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header: None,
            started: false,
            tables: 0,
            rows: 0,
        }
    }

    /// Writer with a declared header. Tables are aligned to it by column name.
    pub fn with_header<I, S>(path: impl Into<PathBuf>, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: Some(header.into_iter().map(Into::into).collect()),
            ..Self::new(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one table.
    ///
    /// Columns are matched by name against the header; header columns the
    /// table lacks are written empty and extra table columns are dropped.
    pub fn append(&mut self, table: &FlatTable) -> Result<()> {
        let file = if self.started {
            self.open_append()?
        } else {
            self.open_truncate()?
        };
        let header = self
            .header
            .get_or_insert_with(|| table.columns.clone())
            .clone();

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if !self.started {
            writer
                .write_record(&header)
                .map_err(|e| OutputError::csv(&self.path, e))?;
            self.started = true;
        }

        let mapping = column_mapping(&header, table);
        if table.columns != header {
            report_drift(&self.path, &header, table);
        }

        for row in &table.rows {
            let rendered = table.render_row(row);
            let aligned = mapping
                .iter()
                .map(|index| index.and_then(|i| rendered.get(i)).map_or("", String::as_str));
            writer
                .write_record(aligned)
                .map_err(|e| OutputError::csv(&self.path, e))?;
        }
        writer.flush().map_err(|e| OutputError::Flush {
            path: self.path.clone(),
            source: e,
        })?;

        self.tables += 1;
        self.rows += table.len();
        debug!(
            path = %self.path.display(),
            rows = table.len(),
            total_rows = self.rows,
            "appended table"
        );
        Ok(())
    }

    /// Finishes writing. A writer with a declared header that never received
    /// a table still produces a header-only file.
    pub fn finish(mut self) -> Result<WriteSummary> {
        if !self.started
            && let Some(header) = self.header.clone()
        {
            let file = self.open_truncate()?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer
                .write_record(&header)
                .map_err(|e| OutputError::csv(&self.path, e))?;
            writer.flush().map_err(|e| OutputError::Flush {
                path: self.path.clone(),
                source: e,
            })?;
            self.started = true;
        }
        Ok(WriteSummary {
            path: self.path,
            tables: self.tables,
            rows: self.rows,
        })
    }

    fn open_truncate(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        File::create(&self.path).map_err(|e| OutputError::Open {
            path: self.path.clone(),
            source: e,
        })
    }

    fn open_append(&self) -> Result<File> {
        OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| OutputError::Open {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// Writes `tables` to `path` in order, header from the first table.
pub fn write_tables<'a, I>(path: impl Into<PathBuf>, tables: I) -> Result<WriteSummary>
where
    I: IntoIterator<Item = &'a FlatTable>,
{
    let mut writer = IncrementalCsvWriter::new(path);
    for table in tables {
        writer.append(table)?;
    }
    writer.finish()
}

fn column_mapping(header: &[String], table: &FlatTable) -> Vec<Option<usize>> {
    header
        .iter()
        .map(|name| table.column_index(name))
        .collect()
}

fn report_drift(path: &Path, header: &[String], table: &FlatTable) {
    let missing: Vec<&str> = header
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(String::as_str)
        .collect();
    let extra: Vec<&str> = table
        .columns
        .iter()
        .filter(|name| !header.contains(name))
        .map(String::as_str)
        .collect();
    if missing.is_empty() && extra.is_empty() {
        // Same columns, different order; alignment handles it.
        return;
    }
    warn!(
        path = %path.display(),
        missing = ?missing,
        extra = ?extra,
        "table columns differ from output header"
    );
}
