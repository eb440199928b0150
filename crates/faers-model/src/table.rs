#![deny(unsafe_code)]

use std::fmt;

use serde_json::{Number, Value};

use crate::PatientId;

/// Name of the identifier column appended to every flat table.
pub const PATID_COLUMN: &str = "patid";

/// A single output cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(Number),
    Missing,
}

impl CellValue {
    /// Converts a resolved JSON value into a cell.
    ///
    /// Booleans, arrays and objects are kept as compact JSON text.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Number(number)) => Self::Number(number.clone()),
            Some(other) => Self::Text(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// CSV rendering: missing values become empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Missing => Ok(()),
        }
    }
}

/// One flattened row. `cells` lines up with the owning table's columns,
/// excluding the trailing `patid` column which is held in `patid`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatRow {
    pub patid: PatientId,
    pub cells: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatTable {
    /// Full header, `patid` last.
    pub columns: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    /// Creates an empty table over `value_columns` with `patid` appended.
    pub fn new<I, S>(value_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = value_columns.into_iter().map(Into::into).collect();
        columns.push(PATID_COLUMN.to_string());
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: FlatRow) {
        debug_assert_eq!(row.cells.len() + 1, self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Looks up a cell by column name. The `patid` column yields a text cell.
    pub fn value(&self, row: usize, column: &str) -> Option<CellValue> {
        let row = self.rows.get(row)?;
        let index = self.column_index(column)?;
        if index == self.columns.len() - 1 {
            return Some(CellValue::Text(row.patid.to_string()));
        }
        row.cells.get(index).cloned()
    }

    /// Renders one row in header order.
    ///
    /// Short rows are padded with empty cells so `patid` always lands in the
    /// last column.
    pub fn render_row(&self, row: &FlatRow) -> Vec<String> {
        let width = self.columns.len().saturating_sub(1);
        let mut out: Vec<String> = (0..width)
            .map(|index| row.cells.get(index).map(ToString::to_string).unwrap_or_default())
            .collect();
        out.push(row.patid.to_string());
        out
    }
}
