//! Field mapping session.
//!
//! Ties schema ingestion, the selection machine and the mapping store into a
//! single [`SessionState`] driven either through its named operations or the
//! [`SessionState::apply`] reducer, and renders the result as an export
//! document or a merge request.
//!
//! # Example
//!
//! ```ignore
//! use fieldmap_ingest::RawInput;
//! use fieldmap_model::Side;
//! use fieldmap_session::SessionState;
//!
//! let mut session = SessionState::new();
//! session.load_side(Side::Existing, RawInput::Bytes(existing_json))?;
//! session.load_side(Side::New, RawInput::Bytes(new_json))?;
//! session.click(Side::Existing, "name");
//! session.click(Side::New, "full_name");
//! let document = session.build_export_document();
//! ```

pub mod artifact;
pub mod error;
pub mod event;
pub mod request;
pub mod service;
pub mod state;

pub use artifact::{export_json, matching_fields};
pub use error::{Result, ServiceError, SessionError};
pub use event::{EventOutcome, SessionEvent};
pub use request::{RequestKind, RequestTracker, Ticket};
pub use service::{MergeService, PreviewUploader, SchemaProvider};
pub use state::{FieldView, SessionState};
