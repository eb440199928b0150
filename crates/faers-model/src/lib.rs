//! Data model for flattening adverse-event reports.
//!
//! Reports arrive as nested JSON trees ([`RawRecord`]). Fields are addressed
//! with dotted [`FieldPath`]s and projected into fixed-width [`FlatTable`]s
//! whose columns are declared per [`Dataset`].

pub mod dataset;
pub mod error;
pub mod ids;
pub mod options;
pub mod path;
pub mod record;
pub mod table;

pub use dataset::{
    DEMOGRAPHIC_FIELDS, DRUG_FIELDS, DRUG_LIST_PATH, Dataset, REACTION_FIELDS,
    REACTION_LIST_PATH, field_paths,
};
pub use error::{ModelError, Result};
pub use ids::PatientId;
pub use options::ReactionPolicy;
pub use path::{FieldPath, resolve};
pub use record::RawRecord;
pub use table::{CellValue, FlatRow, FlatTable, PATID_COLUMN};
