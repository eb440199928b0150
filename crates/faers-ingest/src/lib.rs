//! Adverse-event report ingestion.
//!
//! This crate finds report files in an input directory, parses each one into
//! [`RawRecord`](faers_model::RawRecord)s and assigns every record a synthetic
//! patient id derived from the file's location.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use faers_ingest::{DEFAULT_PATTERN, PatidScheme, list_report_files, load_reports};
//!
//! let scheme = PatidScheme::default();
//! for path in list_report_files(Path::new("raw/2020/q1"), DEFAULT_PATTERN)? {
//!     let records = load_reports(&path, &scheme)?;
//! }
//! ```

mod discovery;
mod error;
mod loader;
mod patid;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{DEFAULT_PATTERN, list_report_files};

// === Loading ===
pub use loader::{RESULTS_KEY, load_reports};

// === Patient Ids ===
pub use patid::PatidScheme;
