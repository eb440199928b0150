//! Source file discovery.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{IngestError, Result};

/// Default file name pattern for report files.
pub const DEFAULT_PATTERN: &str = "*.json";

/// Lists report files in `dir` whose file name matches `pattern`.
///
/// Subdirectories are not descended into. Returns files sorted by filename.
pub fn list_report_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let matcher = Pattern::new(pattern).map_err(|source| IngestError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.matches(name));

        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
