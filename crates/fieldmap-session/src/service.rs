//! Seams to the backend collaborators.
//!
//! The session never talks to the network itself; callers hand it an
//! implementation of these traits (the HTTP client, or a fake in tests).

use std::path::Path;

use fieldmap_model::{MergeRequest, MergeResponse, Record};

use crate::error::ServiceError;

/// Supplies the existing dataset's field names.
pub trait SchemaProvider {
    fn fetch_schema(&self) -> Result<Vec<String>, ServiceError>;
}

/// Decodes an uploaded file server-side and returns its records.
pub trait PreviewUploader {
    fn upload_preview(&self, path: &Path) -> Result<Vec<Record>, ServiceError>;
}

/// Performs the actual merge of new data according to the mappings.
pub trait MergeService {
    fn process_merge(&self, request: &MergeRequest) -> Result<MergeResponse, ServiceError>;
}
