//! Drug projection: one row per drug sub-record.

use faers_model::{
    CellValue, DRUG_FIELDS, DRUG_LIST_PATH, FieldPath, FlatRow, FlatTable, RawRecord, field_paths,
    resolve,
};
use tracing::trace;

/// Projects every drug sub-record of `record` onto the drug columns.
///
/// Each column's path is resolved against each drug element independently;
/// anything absent becomes [`CellValue::Missing`]. A report without a drug
/// list (or with an empty one) yields an empty table, which callers skip.
pub fn project_drugs(record: &RawRecord) -> FlatTable {
    let paths = field_paths(DRUG_FIELDS);
    let mut table = FlatTable::new(DRUG_FIELDS.iter().copied());

    let Some(drugs) = record.sub_records(DRUG_LIST_PATH) else {
        trace!("report has no drug list");
        return table;
    };

    for drug in drugs {
        table.push_row(FlatRow {
            patid: record.patid.clone(),
            cells: project_element(&paths, drug),
        });
    }
    table
}

pub(crate) fn project_element(paths: &[FieldPath], element: &serde_json::Value) -> Vec<CellValue> {
    paths
        .iter()
        .map(|path| CellValue::from_json(resolve(path, element)))
        .collect()
}
