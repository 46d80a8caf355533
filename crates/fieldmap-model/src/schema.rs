//! Per-side schema view: available tables, the active one and its fields.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::side::Side;
use crate::table::{Record, Table, TableSet};

/// Everything the session knows about one side's dataset.
///
/// A side is replaced wholesale on every load; only the active table moves.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSide {
    side: Side,
    tables: TableSet,
    active_table: String,
    fields: Vec<String>,
}

impl SchemaSide {
    /// Builds a side with `default_table` active.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTable`] if `default_table` is not one of `tables`.
    pub fn new(side: Side, tables: TableSet, default_table: impl Into<String>) -> Result<Self> {
        let active_table = default_table.into();
        let fields = resolve_fields(side, &tables, &active_table)?;
        Ok(Self {
            side,
            tables,
            active_table,
            fields,
        })
    }

    /// Switches the active table and re-resolves its field list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownTable`] and leaves the side untouched if
    /// `table` is not present.
    pub fn select_table(&mut self, table: &str) -> Result<()> {
        self.fields = resolve_fields(self.side, &self.tables, table)?;
        self.active_table = table.to_string();
        Ok(())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.names().collect()
    }

    pub fn active_table(&self) -> &str {
        &self.active_table
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Records of the active table.
    pub fn records(&self) -> &[Record] {
        self.tables
            .get(&self.active_table)
            .map(|t| t.records.as_slice())
            .unwrap_or_default()
    }

    /// First `limit` records of the active table as display rows in field order.
    ///
    /// Nested values render as compact JSON; `null` and absent keys as "".
    pub fn preview(&self, limit: usize) -> Vec<Vec<String>> {
        self.records()
            .iter()
            .take(limit)
            .map(|record| {
                self.fields
                    .iter()
                    .map(|field| display_cell(record.get(field)))
                    .collect()
            })
            .collect()
    }
}

fn resolve_fields(side: Side, tables: &TableSet, table: &str) -> Result<Vec<String>> {
    tables
        .get(table)
        .map(Table::field_names)
        .ok_or_else(|| ModelError::UnknownTable {
            side,
            table: table.to_string(),
        })
}

fn display_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Field names split by which schema carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldComparison {
    pub only_existing: Vec<String>,
    pub only_new: Vec<String>,
    pub shared: Vec<String>,
}

impl FieldComparison {
    pub fn is_identical(&self) -> bool {
        self.only_existing.is_empty() && self.only_new.is_empty()
    }
}

/// Compares two field lists by exact name. Each output list keeps schema order.
pub fn compare_fields(existing: &[String], new: &[String]) -> FieldComparison {
    let existing_set: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new.iter().map(String::as_str).collect();

    FieldComparison {
        only_existing: existing
            .iter()
            .filter(|f| !new_set.contains(f.as_str()))
            .cloned()
            .collect(),
        only_new: new
            .iter()
            .filter(|f| !existing_set.contains(f.as_str()))
            .cloned()
            .collect(),
        shared: existing
            .iter()
            .filter(|f| new_set.contains(f.as_str()))
            .cloned()
            .collect(),
    }
}
