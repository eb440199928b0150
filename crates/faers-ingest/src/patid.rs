//! Patient identifier derivation from source file provenance.
//!
//! openFDA bulk downloads are laid out as `<year>/<quarter>/drug-event-NNNN-of-MMMM.json`.
//! The default scheme keeps the last three path components and reduces the
//! file stem to its part number, so record 17 of
//! `2020/q1/drug-event-0001-of-0005.json` becomes `2020_q1_0001_17`.

use std::path::{Component, Path};

use faers_model::PatientId;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Rules for turning a source path into a patient id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatidScheme {
    /// Number of trailing path components kept (the file stem counts as one).
    pub trailing_components: usize,
    /// Index, within the kept components, of the component to split.
    pub split_component: usize,
    /// Delimiter used to split that component.
    pub split_delimiter: char,
    /// Index of the token kept after splitting.
    pub split_index: usize,
}

impl Default for PatidScheme {
    fn default() -> Self {
        Self {
            trailing_components: 3,
            split_component: 2,
            split_delimiter: '-',
            split_index: 2,
        }
    }
}

impl PatidScheme {
    /// Derives the id prefix shared by every record in `path`.
    pub fn prefix(&self, path: &Path) -> Result<String> {
        let scheme_error = |reason: String| IngestError::PatidScheme {
            path: path.to_path_buf(),
            reason,
        };

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| scheme_error("file name is not valid UTF-8".to_string()))?;

        let mut components: Vec<&str> = path
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => part.to_str(),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        components.push(stem);

        if components.len() < self.trailing_components {
            return Err(scheme_error(format!(
                "expected at least {} path components, found {}",
                self.trailing_components,
                components.len()
            )));
        }
        let mut kept: Vec<String> = components[components.len() - self.trailing_components..]
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        let target = kept.get_mut(self.split_component).ok_or_else(|| {
            scheme_error(format!(
                "split component {} is outside the {} kept components",
                self.split_component, self.trailing_components
            ))
        })?;
        let token = target
            .split(self.split_delimiter)
            .nth(self.split_index)
            .ok_or_else(|| {
                scheme_error(format!(
                    "'{target}' has no token {} when split on '{}'",
                    self.split_index, self.split_delimiter
                ))
            })?
            .to_string();
        *target = token;

        Ok(kept.join("_"))
    }

    /// Builds the id for the record at `index` within `path`.
    pub fn patient_id(&self, path: &Path, index: usize) -> Result<PatientId> {
        let prefix = self.prefix(path)?;
        ids_for_prefix(path, &prefix, index)
    }
}

pub(crate) fn ids_for_prefix(path: &Path, prefix: &str, index: usize) -> Result<PatientId> {
    PatientId::from_parts(prefix, index).map_err(|source| IngestError::PatientId {
        path: path.to_path_buf(),
        source,
    })
}
