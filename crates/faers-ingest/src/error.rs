//! Error types for report ingestion.

use std::path::PathBuf;
use thiserror::Error;

use faers_model::ModelError;

/// Errors that can occur while discovering or loading report files.
///
/// Every variant except the directory ones describes a malformed source and
/// is fatal for the file it names.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name pattern is not a valid glob.
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    // === Parsing Errors ===
    /// File is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level object lacks the `results` wrapper.
    #[error("missing top-level 'results' key in {path}")]
    MissingResults { path: PathBuf },

    /// `results` is present but not a list.
    #[error("'results' is not a list in {path}")]
    ResultsNotArray { path: PathBuf },

    // === Identifier Errors ===
    /// The file path does not fit the patient id scheme.
    #[error("cannot derive patient ids from {path}: {reason}")]
    PatidScheme { path: PathBuf, reason: String },

    /// A derived identifier was rejected by the model.
    #[error("invalid patient id for {path}: {source}")]
    PatientId {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// Returns true if the error describes a single malformed source file
    /// rather than a problem with the input directory.
    pub fn is_malformed_source(&self) -> bool {
        !matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::DirectoryRead { .. } | Self::Pattern { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
