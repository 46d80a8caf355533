//! JSON documents: a bare array of records or an object of named tables.

use serde_json::Value;
use tracing::debug;

use fieldmap_model::{DEFAULT_TABLE, Record, Table, TableSet};

use crate::Ingested;
use crate::error::{IngestError, Result};

/// Parses JSON text and normalizes it into tables.
pub fn decode_json(bytes: &[u8]) -> Result<Ingested> {
    let value: Value = serde_json::from_slice(bytes)?;
    ingest_value(value)
}

/// Normalizes an already-parsed JSON value into tables.
///
/// An array becomes the single table [`DEFAULT_TABLE`]. An object contributes
/// one table per key, and its first key becomes the default table.
pub fn ingest_value(value: Value) -> Result<Ingested> {
    match value {
        Value::Array(items) => {
            let records = into_records(DEFAULT_TABLE, items)?;
            debug!(records = records.len(), "decoded single-table document");
            Ok(Ingested::single(Table::new(DEFAULT_TABLE, records)))
        }
        Value::Object(map) => {
            let Some(default_table) = map.keys().next().cloned() else {
                return Err(IngestError::NoTables);
            };
            let mut tables = TableSet::new();
            for (name, entry) in map {
                let Value::Array(items) = entry else {
                    return Err(IngestError::TableNotArray { table: name });
                };
                let records = into_records(&name, items)?;
                tables.insert(Table::new(name, records));
            }
            debug!(tables = tables.len(), default_table = %default_table, "decoded multi-table document");
            Ok(Ingested {
                tables,
                default_table,
            })
        }
        other => Err(IngestError::UnexpectedShape {
            found: kind_name(&other),
        }),
    }
}

fn into_records(table: &str, items: Vec<Value>) -> Result<Vec<Record>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(IngestError::NotARecord {
                table: table.to_string(),
                index,
            }),
        })
        .collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn array_becomes_default_table() {
        let ingested = ingest_value(json!([{"id": 1, "name": "Ada"}])).unwrap();
        assert_eq!(ingested.default_table, "default");
        assert_eq!(ingested.tables.len(), 1);
        assert_eq!(
            ingested.tables.get("default").unwrap().field_names(),
            vec!["id", "name"]
        );
    }

    #[test]
    fn object_keys_become_tables_in_order() {
        let ingested = decode_json(
            br#"{"zeta": [{"a": 1}], "alpha": [{"b": 2}], "mid": []}"#,
        )
        .unwrap();
        assert_eq!(ingested.default_table, "zeta");
        assert_eq!(
            ingested.tables.names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert!(ingested.tables.get("mid").unwrap().field_names().is_empty());
    }

    #[test]
    fn scalar_is_rejected() {
        let err = ingest_value(json!("hello")).unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedShape { found: "a string" }));
    }

    #[test]
    fn empty_object_has_no_tables() {
        let err = ingest_value(json!({})).unwrap_err();
        assert!(matches!(err, IngestError::NoTables));
    }

    #[test]
    fn non_array_table_is_rejected() {
        let err = ingest_value(json!({"users": {"id": 1}})).unwrap_err();
        assert!(matches!(err, IngestError::TableNotArray { ref table } if table == "users"));
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = ingest_value(json!([{"id": 1}, 5])).unwrap_err();
        assert!(matches!(err, IngestError::NotARecord { index: 1, .. }));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let err = decode_json(b"not json").unwrap_err();
        assert!(matches!(err, IngestError::Json(_)));
    }
}
