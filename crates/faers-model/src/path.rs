//! Dotted field paths and their resolution against a JSON tree.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::ModelError;

/// A projection target such as `drugindication` or `patient.patientsex`.
///
/// Paths have one or two segments. Deeper nesting is not addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Key(String),
    Nested(String, String),
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ModelError::InvalidFieldPath(raw.to_string()));
        }
        match segments.as_slice() {
            [key] => Ok(Self::Key((*key).to_string())),
            [outer, inner] => Ok(Self::Nested((*outer).to_string(), (*inner).to_string())),
            _ => Err(ModelError::InvalidFieldPath(raw.to_string())),
        }
    }

    /// The dotted form, used as the output column name.
    pub fn column_name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for FieldPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Nested(outer, inner) => write!(f, "{outer}.{inner}"),
        }
    }
}

/// Resolves `path` against `node`.
///
/// Returns `None` when any segment is absent, when an intermediate value is
/// not a mapping, or when the value found is JSON `null`.
pub fn resolve<'a>(path: &FieldPath, node: &'a Value) -> Option<&'a Value> {
    let found = match path {
        FieldPath::Key(key) => node.as_object()?.get(key)?,
        FieldPath::Nested(outer, inner) => node.as_object()?.get(outer)?.as_object()?.get(inner)?,
    };
    if found.is_null() { None } else { Some(found) }
}
