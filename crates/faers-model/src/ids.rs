#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Synthetic patient identifier: source provenance tokens plus the record's
/// position within its file, e.g. `2020_q1_0001_17`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidPatientId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds `{prefix}_{index}`.
    pub fn from_parts(prefix: &str, index: usize) -> Result<Self, ModelError> {
        Self::new(format!("{prefix}_{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
