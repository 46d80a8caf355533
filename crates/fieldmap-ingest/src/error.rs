//! Error types for schema ingestion.

use std::path::PathBuf;
use thiserror::Error;

use fieldmap_model::ModelError;

/// Input could not be decoded into records or tables.
///
/// Ingestion never recovers partially: any of these leaves the caller's
/// previous state untouched.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Structure Errors ===
    /// Input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is neither an array of records nor an object of tables.
    #[error("expected an array of records or an object of tables, found {found}")]
    UnexpectedShape { found: &'static str },

    /// A multi-table document has no tables.
    #[error("document contains no tables")]
    NoTables,

    /// A table entry in a multi-table document is not an array.
    #[error("table '{table}' is not an array of records")]
    TableNotArray { table: String },

    /// An element of a table is not an object.
    #[error("record {index} of table '{table}' is not an object")]
    NotARecord { table: String, index: usize },

    // === Delimited Text Errors ===
    /// Failed to parse delimited text.
    #[error("failed to parse delimited text: {0}")]
    Delimited(#[from] csv::Error),

    /// A data row has non-empty cells beyond the header's columns.
    #[error("line {line} has {cells} cells but the header names {columns} columns")]
    RaggedRow {
        line: u64,
        cells: usize,
        columns: usize,
    },

    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension has no decoder.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Schema Errors ===
    #[error(transparent)]
    Schema(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
