//! Report file loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use faers_model::RawRecord;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::patid::{PatidScheme, ids_for_prefix};

/// Top-level key wrapping the report list in every source file.
pub const RESULTS_KEY: &str = "results";

/// Parses a report file into records with patient ids assigned.
///
/// The file must be a JSON object of the form `{"results": [ ... ]}`. Any
/// deviation is fatal for the file; nothing is partially recovered.
pub fn load_reports(path: &Path, scheme: &PatidScheme) -> Result<Vec<RawRecord>> {
    let prefix = scheme.prefix(path)?;

    let file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| IngestError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

    let reports = extract_results(path, document)?;
    debug!(path = %path.display(), reports = reports.len(), "loaded report file");

    reports
        .into_iter()
        .enumerate()
        .map(|(index, body)| Ok(RawRecord::new(ids_for_prefix(path, &prefix, index)?, body)))
        .collect()
}

fn extract_results(path: &Path, document: Value) -> Result<Vec<Value>> {
    let Value::Object(mut map) = document else {
        return Err(IngestError::MissingResults {
            path: path.to_path_buf(),
        });
    };
    match map.remove(RESULTS_KEY) {
        Some(Value::Array(reports)) => Ok(reports),
        Some(_) => Err(IngestError::ResultsNotArray {
            path: path.to_path_buf(),
        }),
        None => Err(IngestError::MissingResults {
            path: path.to_path_buf(),
        }),
    }
}
