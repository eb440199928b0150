//! Configuration options for flattening.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the reaction sub-record list is reconciled with the demographics row.
///
/// A report can carry several reactions but the demographics dataset is
/// keyed by patient, so the choice has to be explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionPolicy {
    /// Take reaction fields from the first reaction only. One row per report.
    #[default]
    First,
    /// Emit one row per reaction with the scalar fields repeated.
    PerReaction,
}

impl ReactionPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::PerReaction => "per-reaction",
        }
    }
}

impl fmt::Display for ReactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
