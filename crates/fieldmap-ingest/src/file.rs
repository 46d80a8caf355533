//! Local files dispatched to a decoder by extension.

use std::fs;
use std::path::Path;

use tracing::info;

use fieldmap_model::{DEFAULT_TABLE, Table};

use crate::Ingested;
use crate::delimited::decode_delimited;
use crate::error::{IngestError, Result};
use crate::json::decode_json;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
    Tsv,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Reads and decodes a file. Delimited files become the single default table.
pub fn load_file(path: &Path) -> Result<Ingested> {
    let format = FileFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let ingested = match format {
        FileFormat::Json => decode_json(&bytes)?,
        FileFormat::Csv => delimited_table(&bytes, b',')?,
        FileFormat::Tsv => delimited_table(&bytes, b'\t')?,
    };
    info!(
        path = %path.display(),
        tables = ingested.tables.len(),
        default_table = %ingested.default_table,
        "loaded dataset file"
    );
    Ok(ingested)
}

fn delimited_table(bytes: &[u8], delimiter: u8) -> Result<Ingested> {
    let records = decode_delimited(bytes, delimiter)?;
    Ok(Ingested::single(Table::new(DEFAULT_TABLE, records)))
}
