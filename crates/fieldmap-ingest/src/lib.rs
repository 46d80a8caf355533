//! Schema ingestion for field mapping sessions.
//!
//! Every input shape (a JSON array of records, a JSON object of tables, a flat
//! field list from a schema provider, delimited text) is normalized into the
//! same [`Ingested`] form: an ordered set of tables plus the table selected by
//! default.
//!
//! # Example
//!
//! ```ignore
//! use fieldmap_ingest::{RawInput, ingest};
//!
//! let ingested = ingest(RawInput::Bytes(br#"[{"id": 1}]"#.to_vec()))?;
//! assert_eq!(ingested.default_table, "default");
//! ```

pub mod delimited;
pub mod error;
pub mod file;
pub mod json;
pub mod schema;

use serde_json::Value;

use fieldmap_model::{DEFAULT_TABLE, Record, SchemaSide, Side, Table, TableSet};

pub use delimited::decode_delimited;
pub use error::{IngestError, Result};
pub use file::{FileFormat, load_file};
pub use json::{decode_json, ingest_value};
pub use schema::ingest_schema_fields;

/// Raw input accepted by [`ingest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// JSON text, typically a file's contents.
    Bytes(Vec<u8>),
    /// An already-parsed JSON document.
    Json(Value),
    /// Records decoded elsewhere, e.g. an upload-preview response.
    Records(Vec<Record>),
    /// A schema-provider field list.
    SchemaFields(Vec<String>),
}

/// Normalized tables plus the default selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub tables: TableSet,
    pub default_table: String,
}

impl Ingested {
    pub fn single(table: Table) -> Self {
        Self {
            default_table: table.name.clone(),
            tables: TableSet::single(table),
        }
    }

    /// Turns the tables into a schema side with the default table active.
    pub fn into_side(self, side: Side) -> Result<SchemaSide> {
        Ok(SchemaSide::new(side, self.tables, self.default_table)?)
    }
}

/// Normalizes any supported raw input into tables.
pub fn ingest(raw: RawInput) -> Result<Ingested> {
    match raw {
        RawInput::Bytes(bytes) => decode_json(&bytes),
        RawInput::Json(value) => ingest_value(value),
        RawInput::Records(records) => Ok(Ingested::single(Table::new(DEFAULT_TABLE, records))),
        RawInput::SchemaFields(fields) => Ok(ingest_schema_fields(fields)),
    }
}
