//! Blocking client for the merge backend.

use std::path::Path;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info};

use fieldmap_model::{MergeRequest, MergeResponse, Record, SchemaResponse, UploadPreviewResponse};
use fieldmap_session::{MergeService, PreviewUploader, SchemaProvider, ServiceError};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const SCHEMA_PATH: &str = "/sales-schema";
const UPLOAD_PREVIEW_PATH: &str = "/upload-preview";
const MERGE_PATH: &str = "/process-merge-mappings";

/// Multipart field name the upload endpoint reads the file from.
const UPLOAD_FIELD: &str = "file";

/// Client for the schema, upload-preview and merge endpoints.
pub struct MergeClient {
    client: Client,
    base_url: String,
}

impl MergeClient {
    /// Create a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.api_url)?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the field list of the existing dataset.
    pub fn sales_schema(&self) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, SCHEMA_PATH);
        debug!(%url, "fetching schema");
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, user_agent())
            .header(ACCEPT, "application/json")
            .send()?;
        let body = success_body(response)?;
        let fields = parse_schema(&body)?;
        info!(fields = fields.len(), "schema fetched");
        Ok(fields)
    }

    /// Upload a file and get back the records the backend decoded from it.
    pub fn upload_file(&self, path: &Path) -> Result<Vec<Record>> {
        let url = endpoint(&self.base_url, UPLOAD_PREVIEW_PATH);
        debug!(%url, path = %path.display(), "uploading file for preview");
        let form = Form::new().file(UPLOAD_FIELD, path)?;
        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, user_agent())
            .multipart(form)
            .send()?;
        let body = success_body(response)?;
        let records = parse_upload_preview(&body)?;
        info!(records = records.len(), "upload preview received");
        Ok(records)
    }

    /// Submit a merge request.
    pub fn submit_merge(&self, request: &MergeRequest) -> Result<MergeResponse> {
        let url = endpoint(&self.base_url, MERGE_PATH);
        debug!(
            %url,
            mappings = request.field_mappings.mappings.len(),
            records = request.new_data.len(),
            "submitting merge"
        );
        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, user_agent())
            .json(request)
            .send()?;
        let body = success_body(response)?;
        parse_merge_response(&body)
    }
}

impl SchemaProvider for MergeClient {
    fn fetch_schema(&self) -> std::result::Result<Vec<String>, ServiceError> {
        self.sales_schema().map_err(ServiceError::from)
    }
}

impl PreviewUploader for MergeClient {
    fn upload_preview(&self, path: &Path) -> std::result::Result<Vec<Record>, ServiceError> {
        self.upload_file(path).map_err(ServiceError::from)
    }
}

impl MergeService for MergeClient {
    fn process_merge(
        &self,
        request: &MergeRequest,
    ) -> std::result::Result<MergeResponse, ServiceError> {
        self.submit_merge(request).map_err(ServiceError::from)
    }
}

fn user_agent() -> String {
    format!("fieldmap/{}", env!("CARGO_PKG_VERSION"))
}

/// Reads the body of a successful response, turning other statuses into errors.
fn success_body(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .ok()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.text()?)
}

/// Validates a base URL and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!(
            "API URL must start with http:// or https://, got '{raw}'"
        )));
    }
    Ok(trimmed.to_string())
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

pub(crate) fn parse_schema(body: &str) -> Result<Vec<String>> {
    let response: SchemaResponse = serde_json::from_str(body)?;
    Ok(response.schema)
}

pub(crate) fn parse_upload_preview(body: &str) -> Result<Vec<Record>> {
    let response: UploadPreviewResponse = serde_json::from_str(body)?;
    Ok(response.new_data)
}

pub(crate) fn parse_merge_response(body: &str) -> Result<MergeResponse> {
    Ok(serde_json::from_str(body)?)
}
