use serde_json::Value;

use crate::PatientId;

/// One adverse-event report as read from a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub patid: PatientId,
    pub body: Value,
}

impl RawRecord {
    pub fn new(patid: PatientId, body: Value) -> Self {
        Self { patid, body }
    }

    /// Returns the array at `outer.inner`, if present.
    ///
    /// A present value that is not an array is treated as absent.
    pub fn sub_records(&self, (outer, inner): (&str, &str)) -> Option<&[Value]> {
        self.body
            .get(outer)?
            .get(inner)?
            .as_array()
            .map(Vec::as_slice)
    }
}
