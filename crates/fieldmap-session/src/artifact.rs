//! Export documents and merge payloads built from the current session.
//!
//! Both builders read the session without mutating it.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use fieldmap_model::{ExportDocument, ExportMetadata, Mapping, MergeRequest, Record, Side};

use crate::error::{Result, SessionError};
use crate::state::SessionState;

impl SessionState {
    /// Export document stamped with the current time.
    pub fn build_export_document(&self) -> ExportDocument {
        self.build_export_document_at(Utc::now())
    }

    pub fn build_export_document_at(&self, exported_at: DateTime<Utc>) -> ExportDocument {
        ExportDocument {
            mappings: self.mappings().to_vec(),
            metadata: ExportMetadata {
                export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                existing_data_fields: self.fields(Side::Existing).to_vec(),
                new_data_fields: self.fields(Side::New).to_vec(),
            },
        }
    }

    /// Merge payload for `new_records` under the current mappings.
    pub fn build_merge_request(&self, new_records: Vec<Record>) -> MergeRequest {
        MergeRequest {
            new_data: new_records,
            field_mappings: self.mappings().to_vec().into(),
            matching_fields: matching_fields(self.fields(Side::Existing), self.mappings().as_slice()),
        }
    }

    /// Writes the export document as pretty JSON and returns what was written.
    ///
    /// Like every other action this clears the previous error, and a failure
    /// is retained as [`SessionState::last_error`].
    pub fn write_export(&mut self, path: &Path) -> Result<ExportDocument> {
        self.clear_error();
        let document = self.build_export_document();
        let written = export_json(&document)
            .map_err(|e| SessionError::Export(e.to_string()))
            .and_then(|json| {
                fs::write(path, json)
                    .map_err(|e| SessionError::Export(format!("{}: {e}", path.display())))
            });
        if let Err(err) = written {
            return self.fail(err);
        }
        info!(
            path = %path.display(),
            mappings = document.mappings.len(),
            "exported mappings"
        );
        Ok(document)
    }
}

/// Existing-side fields that are the `existing` half of a mapping with a
/// non-empty partner, in schema order.
pub fn matching_fields(existing_fields: &[String], mappings: &[Mapping]) -> Vec<String> {
    existing_fields
        .iter()
        .filter(|field| {
            mappings
                .iter()
                .any(|m| &m.existing == *field && !m.new.is_empty())
        })
        .cloned()
        .collect()
}

/// Serializes an export document with two-space indentation.
pub fn export_json(document: &ExportDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}
