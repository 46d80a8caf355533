//! Delimited text (CSV/TSV) decoded into the record-array shape.

use std::io::Read;

use csv::ReaderBuilder;
use serde_json::Value;

use fieldmap_model::Record;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads delimited text whose first non-blank row is the header.
///
/// Every value is kept as a string; short rows are padded with "". A row with
/// non-blank cells past the last header column is rejected.
pub fn decode_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            headers = Some(row.iter().map(normalize_header).collect());
            continue;
        }
        let Some(headers) = headers.as_ref() else {
            continue;
        };
        if row.iter().skip(headers.len()).any(|value| !value.trim().is_empty()) {
            return Err(IngestError::RaggedRow {
                line: row.position().map_or(0, csv::Position::line),
                cells: row.len(),
                columns: headers.len(),
            });
        }
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = row.get(idx).map(normalize_cell).unwrap_or_default();
                (header.clone(), Value::String(value))
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}
