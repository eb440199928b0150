//! Statically declared output schemas.
//!
//! The projection and the writer share these column lists, so the header of
//! every table for a dataset is known before any record is read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FieldPath, FlatTable};

/// Columns projected from each drug sub-record.
pub const DRUG_FIELDS: &[&str] = &[
    "activesubstance.activesubstancename",
    "drugindication",
    "drugcharacterization",
    "medicinalproduct",
    "openfda.route",
    "openfda.product_type",
];

/// Scalar columns projected once per report.
pub const DEMOGRAPHIC_FIELDS: &[&str] = &[
    "primarysource.qualification",
    "receivedate",
    "receiptdate",
    "primarysource.reportercountry",
    "patient.patientonsetage",
    "patient.patientsex",
    "patient.patientweight",
    "patient.patientagegroup",
    "serious",
    "seriousnessdeath",
    "seriousnessdisabling",
    "seriousnesshospitalization",
    "seriousnesslifethreatening",
    "seriousnessother",
];

/// Columns taken from the flattened reaction sub-records.
pub const REACTION_FIELDS: &[&str] = &["reactionmeddrapt", "reactionoutcome"];

/// Location of the drug sub-record list inside a report.
pub const DRUG_LIST_PATH: (&str, &str) = ("patient", "drug");

/// Location of the reaction sub-record list inside a report.
pub const REACTION_LIST_PATH: (&str, &str) = ("patient", "reaction");

/// The two flat datasets produced from adverse-event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// One row per drug sub-record.
    Drugs,
    /// Demographic and seriousness fields, written as `other_<label>.csv`.
    Demographics,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Drugs, Dataset::Demographics];

    /// Output file stem.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Drugs => "drugs",
            Self::Demographics => "other",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Drugs => "Drug sub-records, one row per drug",
            Self::Demographics => "Patient demographics, seriousness and reactions",
        }
    }

    /// Value columns in output order, excluding `patid`.
    pub fn value_columns(self) -> Vec<&'static str> {
        match self {
            Self::Drugs => DRUG_FIELDS.to_vec(),
            Self::Demographics => DEMOGRAPHIC_FIELDS
                .iter()
                .chain(REACTION_FIELDS)
                .copied()
                .collect(),
        }
    }

    /// Full output header, `patid` last.
    pub fn header(self) -> Vec<String> {
        FlatTable::new(self.value_columns()).columns
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Parses a list of known-good dotted names.
pub fn field_paths(names: &[&str]) -> Vec<FieldPath> {
    names
        .iter()
        .map(|name| match name.split_once('.') {
            Some((outer, inner)) => FieldPath::Nested(outer.to_string(), inner.to_string()),
            None => FieldPath::Key((*name).to_string()),
        })
        .collect()
}
