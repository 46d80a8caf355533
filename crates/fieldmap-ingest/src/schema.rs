//! Schema-provider responses: a flat list of field names.

use serde_json::Value;

use fieldmap_model::{DEFAULT_TABLE, Record, Table};

use crate::Ingested;

/// Wraps a field-name list as a single-table view.
///
/// The table holds one placeholder record whose keys are exactly `fields`,
/// each set to `null`, so it reads like any decoded file.
pub fn ingest_schema_fields<I, S>(fields: I) -> Ingested
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let placeholder: Record = fields
        .into_iter()
        .map(|name| (name.into(), Value::Null))
        .collect();
    Ingested::single(Table::new(DEFAULT_TABLE, vec![placeholder]))
}
