//! Flattening of nested adverse-event reports into fixed-width tables.

pub mod demographics;
pub mod drug;
pub mod reaction;

use faers_model::{Dataset, FlatTable, RawRecord, ReactionPolicy};

pub use demographics::project_demographics;
pub use drug::project_drugs;
pub use reaction::ReactionTable;

/// Projects `record` for `dataset`.
///
/// Drug tables may be empty; demographics tables never are.
pub fn project(dataset: Dataset, record: &RawRecord, policy: ReactionPolicy) -> FlatTable {
    match dataset {
        Dataset::Drugs => project_drugs(record),
        Dataset::Demographics => project_demographics(record, policy),
    }
}
