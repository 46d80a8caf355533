//! HTTP access to the merge backend.
//!
//! [`MergeClient`] talks to three endpoints relative to a configured base URL:
//!
//! - `GET /sales-schema` returns `{"schema": [field, ...]}`
//! - `POST /upload-preview` takes a multipart `file` and returns `{"new_data": [...]}`
//! - `POST /process-merge-mappings` takes a merge request and returns `{"message": "..."}`
//!
//! The client implements the session's service traits so a session can drive
//! it directly.

pub mod client;
pub mod config;
pub mod error;

pub use client::MergeClient;
pub use config::{API_TIMEOUT_ENV, API_URL_ENV, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, Result};
