//! Error types for mapping sessions.
//!
//! Errors hold rendered messages rather than source errors so the session can
//! keep the last one for display while also returning it to the caller.

use thiserror::Error;

use fieldmap_ingest::IngestError;
use fieldmap_model::{ModelError, Side};

use crate::request::RequestKind;

/// Failure reported by an external collaborator (schema provider, uploader,
/// merge service).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A local file could not be read for upload.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ServiceError {
    /// Returns whether re-issuing the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidResponse(_) | Self::Io(_) => false,
        }
    }
}

/// Errors surfaced by session operations.
///
/// None of them ends the session; the state stays usable after each.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// Input could not be decoded; the session is unchanged.
    #[error("could not decode input: {0}")]
    Decode(String),

    /// The existing-side schema could not be fetched.
    #[error("existing schema unavailable: {0}")]
    SchemaFetch(ServiceError),

    /// Uploading the new dataset for preview failed.
    #[error("upload preview failed: {0}")]
    Upload(ServiceError),

    /// Submitting the merge request failed.
    #[error("merge failed: {0}")]
    Merge(ServiceError),

    /// A request of this kind is still outstanding.
    #[error("a {0} request is already in progress")]
    Busy(RequestKind),

    /// The requested table is not part of the side's dataset.
    #[error("table '{table}' does not exist on the {side} side")]
    UnknownTable { side: Side, table: String },

    /// The operation needs a dataset on this side first.
    #[error("no {0} dataset is loaded")]
    SideNotLoaded(Side),

    /// The export document could not be written.
    #[error("failed to write export: {0}")]
    Export(String),
}

impl SessionError {
    /// Short banner text for the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Decode(_) => "The data could not be read. Please check the file contents and format.",
            Self::SchemaFetch(_) => "Could not load the existing schema from the server.",
            Self::Upload(_) => "Could not upload the file for preview. Please try again.",
            Self::Merge(_) => "The merge could not be processed. Please try again.",
            Self::Busy(_) => "Please wait for the current request to finish.",
            Self::UnknownTable { .. } => "The selected table is not available.",
            Self::SideNotLoaded(Side::Existing) => "Load the existing data first.",
            Self::SideNotLoaded(Side::New) => "Load the new data first.",
            Self::Export(_) => "The mappings could not be exported.",
        }
    }

    /// Returns whether re-clicking the same action may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::SchemaFetch(err) | Self::Upload(err) | Self::Merge(err) => err.is_retryable(),
            Self::Busy(_) => true,
            Self::Decode(_)
            | Self::UnknownTable { .. }
            | Self::SideNotLoaded(_)
            | Self::Export(_) => false,
        }
    }
}

impl From<IngestError> for SessionError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Schema(model) => model.into(),
            other => Self::Decode(other.to_string()),
        }
    }
}

impl From<ModelError> for SessionError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownTable { side, table } => Self::UnknownTable { side, table },
        }
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
