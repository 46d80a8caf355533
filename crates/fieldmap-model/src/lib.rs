#![deny(unsafe_code)]

//! Data model shared by every field mapping crate.
//!
//! The types here carry no behavior beyond lookups and projections: schema
//! ingestion, the selection machine and the session live in their own crates.

pub mod artifact;
pub mod error;
pub mod mapping;
pub mod schema;
pub mod side;
pub mod table;

pub use artifact::{
    EXPORT_FILE_NAME, ExportDocument, ExportMetadata, MergeRequest, MergeResponse,
    SchemaResponse, UploadPreviewResponse,
};
pub use error::{ModelError, Result};
pub use mapping::{Mapping, MappingSet};
pub use schema::{FieldComparison, SchemaSide, compare_fields};
pub use side::{FieldRef, Side};
pub use table::{DEFAULT_TABLE, Record, Table, TableSet};
