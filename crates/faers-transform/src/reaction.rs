//! Flattening of the reaction sub-record list.

use std::collections::{BTreeMap, BTreeSet};

use faers_model::{REACTION_LIST_PATH, RawRecord};
use serde_json::Value;

/// Reaction sub-records with nested mappings flattened into dotted keys.
#[derive(Debug, Default)]
pub struct ReactionTable<'a> {
    columns: BTreeSet<String>,
    rows: Vec<BTreeMap<String, &'a Value>>,
}

impl<'a> ReactionTable<'a> {
    pub fn from_record(record: &'a RawRecord) -> Self {
        let mut table = Self::default();
        for element in record.sub_records(REACTION_LIST_PATH).unwrap_or_default() {
            let mut row = BTreeMap::new();
            flatten_into(None, element, &mut row);
            table.columns.extend(row.keys().cloned());
            table.rows.push(row);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Value of `column` in row `row`. `None` when the column is absent from
    /// the table, the row does not exist, or the row lacks the column.
    pub fn get(&self, row: usize, column: &str) -> Option<&'a Value> {
        if !self.has_column(column) {
            return None;
        }
        self.rows.get(row)?.get(column).copied()
    }
}

fn flatten_into<'a>(prefix: Option<&str>, value: &'a Value, out: &mut BTreeMap<String, &'a Value>) {
    let Value::Object(map) = value else {
        if let Some(prefix) = prefix {
            out.insert(prefix.to_string(), value);
        }
        return;
    };
    for (key, child) in map {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match child {
            Value::Object(_) => flatten_into(Some(&name), child, out),
            _ => {
                out.insert(name, child);
            }
        }
    }
}
