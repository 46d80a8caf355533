//! Documents produced from a mapping session and the backend wire shapes.
//!
//! Every type here is a projection rebuilt on demand; none of them is mutated
//! after construction.

use serde::{Deserialize, Serialize};

use crate::mapping::{Mapping, MappingSet};
use crate::table::Record;

/// File name offered for exported mapping documents.
pub const EXPORT_FILE_NAME: &str = "field-mappings.json";

/// Downloadable mapping document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub mappings: Vec<Mapping>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub export_date: String,
    /// Field names of the active existing-side table.
    pub existing_data_fields: Vec<String>,
    /// Field names of the active new-side table.
    pub new_data_fields: Vec<String>,
}

/// Body of `POST /process-merge-mappings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub new_data: Vec<Record>,
    pub field_mappings: MappingSet,
    /// Existing-side fields that take part in at least one mapping.
    pub matching_fields: Vec<String>,
}

/// Reply of `POST /process-merge-mappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResponse {
    pub message: String,
}

/// Reply of `GET /sales-schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub schema: Vec<String>,
}

/// Reply of `POST /upload-preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPreviewResponse {
    pub new_data: Vec<Record>,
}
