//! Demographics projection: scalar report fields plus reaction fields.

use faers_model::{
    CellValue, DEMOGRAPHIC_FIELDS, Dataset, FlatRow, FlatTable, REACTION_FIELDS, RawRecord,
    ReactionPolicy, field_paths,
};
use tracing::trace;

use crate::drug::project_element;
use crate::reaction::ReactionTable;

/// Projects `record` onto the demographics columns.
///
/// Scalar fields are resolved once against the report. Reaction fields come
/// from the flattened reaction list according to `policy`:
///
/// - [`ReactionPolicy::First`]: exactly one row, reaction fields from the
///   first reaction.
/// - [`ReactionPolicy::PerReaction`]: one row per reaction, scalars repeated.
///   Reports without reactions still produce one row.
///
/// Missing fields at any level become [`CellValue::Missing`]; this never fails.
pub fn project_demographics(record: &RawRecord, policy: ReactionPolicy) -> FlatTable {
    let mut table = FlatTable::new(Dataset::Demographics.value_columns());
    let scalars = project_element(&field_paths(DEMOGRAPHIC_FIELDS), &record.body);
    let reactions = ReactionTable::from_record(record);

    let reaction_rows = match policy {
        ReactionPolicy::First => 1,
        ReactionPolicy::PerReaction => reactions.len().max(1),
    };
    trace!(
        reactions = reactions.len(),
        rows = reaction_rows,
        %policy,
        "projected demographics"
    );

    for index in 0..reaction_rows {
        let mut cells = scalars.clone();
        cells.extend(
            REACTION_FIELDS
                .iter()
                .map(|column| CellValue::from_json(reactions.get(index, column))),
        );
        table.push_row(FlatRow {
            patid: record.patid.clone(),
            cells,
        });
    }
    table
}
