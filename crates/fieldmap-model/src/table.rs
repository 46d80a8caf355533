#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name given to a table when the input is a bare array of records.
pub const DEFAULT_TABLE: &str = "default";

/// One decoded record. Key order follows the source document.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Field names of the table: the keys of its first record only.
    ///
    /// Tables without records have no fields.
    pub fn field_names(&self) -> Vec<String> {
        self.records
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Tables of one dataset, kept in the order they were decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(table: Table) -> Self {
        Self {
            tables: vec![table],
        }
    }

    /// Appends a table, replacing an earlier one with the same name in place.
    pub fn insert(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(slot) => *slot = table,
            None => self.tables.push(table),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut set = Self::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn field_names_come_from_first_record() {
        let table = Table::new(
            "people",
            vec![
                record(json!({"id": 1, "name": "Ada"})),
                record(json!({"id": 2, "name": "Bob", "extra": true})),
            ],
        );
        assert_eq!(table.field_names(), vec!["id", "name"]);
    }

    #[test]
    fn empty_table_has_no_fields() {
        let table = Table::new("empty", Vec::new());
        assert!(table.field_names().is_empty());
    }

    #[test]
    fn insert_keeps_order_and_replaces_by_name() {
        let mut set = TableSet::new();
        set.insert(Table::new("a", Vec::new()));
        set.insert(Table::new("b", Vec::new()));
        set.insert(Table::new("a", vec![record(json!({"x": 1}))]));

        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a").map(Table::field_names), Some(vec!["x".to_string()]));
    }
}
