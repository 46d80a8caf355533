//! Session state and its transitions.
//!
//! [`SessionState`] owns both schema sides, the selection machine, the mapping
//! store, outstanding request generations and the last error. Every method
//! here runs to completion on the caller's thread; the only asynchrony is the
//! gap between a `begin_*` and its `complete_*`.

use std::path::Path;

use tracing::{info, warn};

use fieldmap_ingest::{Ingested, RawInput, ingest, ingest_schema_fields};
use fieldmap_map::{
    ClickOutcome, Connector, MappingStore, Rect, SelectionController, SelectionState,
    connector_lines,
};
use fieldmap_model::{FieldRef, Mapping, MergeRequest, MergeResponse, Record, SchemaSide, Side};

use crate::error::{Result, ServiceError, SessionError};
use crate::request::{RequestKind, RequestTracker, Ticket};
use crate::service::{MergeService, PreviewUploader, SchemaProvider};

/// Rendering hints for one field of a side's active table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    /// Referenced by at least one mapping on this side.
    pub mapped: bool,
    /// The pending field of an armed selection.
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    existing: Option<SchemaSide>,
    new: Option<SchemaSide>,
    selection: SelectionController,
    mappings: MappingStore,
    requests: RequestTracker,
    last_error: Option<SessionError>,
    merge_status: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // === Accessors ===

    pub fn side(&self, side: Side) -> Option<&SchemaSide> {
        match side {
            Side::Existing => self.existing.as_ref(),
            Side::New => self.new.as_ref(),
        }
    }

    /// Field names of the side's active table; empty when nothing is loaded.
    pub fn fields(&self, side: Side) -> &[String] {
        self.side(side).map(SchemaSide::fields).unwrap_or_default()
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Message returned by the last successful merge.
    pub fn merge_status(&self) -> Option<&str> {
        self.merge_status.as_deref()
    }

    pub fn is_busy(&self, kind: RequestKind) -> bool {
        self.requests.is_busy(kind)
    }

    pub fn field_views(&self, side: Side) -> Vec<FieldView> {
        self.fields(side)
            .iter()
            .map(|name| FieldView {
                name: name.clone(),
                mapped: self.mappings.is_referenced(name, side),
                selected: self.selection.is_selected(side, name),
            })
            .collect()
    }

    /// Connector curves for the current mappings given on-screen field boxes.
    pub fn connectors<F>(&self, locate: F) -> Vec<Connector>
    where
        F: FnMut(Side, &str) -> Option<Rect>,
    {
        connector_lines(self.mappings.as_slice(), locate)
    }

    // === User actions ===

    /// Replaces a side with freshly ingested data and drops all mappings.
    ///
    /// On a decode error the session is left as it was apart from the
    /// recorded error.
    pub fn load_side(&mut self, side: Side, raw: RawInput) -> Result<()> {
        self.last_error = None;
        let schema = match ingest(raw).and_then(|ingested| ingested.into_side(side)) {
            Ok(schema) => schema,
            Err(err) => return self.fail(err.into()),
        };
        self.install_side(schema);
        Ok(())
    }

    /// Same as [`load_side`](Self::load_side) for data decoded elsewhere.
    pub fn load_ingested(&mut self, side: Side, ingested: Ingested) -> Result<()> {
        self.last_error = None;
        match ingested.into_side(side) {
            Ok(schema) => {
                self.install_side(schema);
                Ok(())
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Switches a side's active table and drops all mappings.
    pub fn select_table(&mut self, side: Side, table: &str) -> Result<()> {
        self.last_error = None;
        let slot = match side {
            Side::Existing => self.existing.as_mut(),
            Side::New => self.new.as_mut(),
        };
        let Some(schema) = slot else {
            return self.fail(SessionError::SideNotLoaded(side));
        };
        if let Err(err) = schema.select_table(table) {
            return self.fail(err.into());
        }
        info!(side = %side, table, "selected table");
        self.reset_mapping_state();
        Ok(())
    }

    /// Feeds a field click into the selection machine.
    pub fn click(&mut self, side: Side, field: &str) -> ClickOutcome {
        self.last_error = None;
        let table = self
            .side(side)
            .map(|schema| schema.active_table().to_string())
            .unwrap_or_default();
        self.selection
            .click(FieldRef::new(side, table, field), &mut self.mappings)
    }

    /// Removes a mapping from the list view. A pending selection stays armed.
    pub fn remove_mapping(&mut self, index: usize) -> Option<Mapping> {
        self.last_error = None;
        self.mappings.remove_at(index)
    }

    // === Backend requests ===

    pub fn begin_schema_fetch(&mut self) -> Ticket {
        self.last_error = None;
        self.requests.begin_superseding(RequestKind::SchemaFetch)
    }

    /// Applies a schema-provider response. Returns `Ok(false)` if superseded.
    ///
    /// On failure the existing side becomes an empty schema so the session
    /// stays usable, and the error is kept for display.
    pub fn complete_schema_fetch(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<Vec<String>, ServiceError>,
    ) -> Result<bool> {
        if !self.accept(ticket) {
            return Ok(false);
        }
        match result {
            Ok(fields) => {
                info!(fields = fields.len(), "fetched existing schema");
                self.load_ingested(Side::Existing, ingest_schema_fields(fields))?;
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "schema fetch failed");
                self.load_ingested(Side::Existing, ingest_schema_fields(Vec::<String>::new()))?;
                self.fail(SessionError::SchemaFetch(err))
            }
        }
    }

    pub fn begin_upload(&mut self) -> Ticket {
        self.last_error = None;
        self.requests.begin_superseding(RequestKind::UploadPreview)
    }

    /// Applies an upload-preview response. Returns `Ok(false)` if superseded.
    ///
    /// Failures keep the current session, mappings included.
    pub fn complete_upload(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<Vec<Record>, ServiceError>,
    ) -> Result<bool> {
        if !self.accept(ticket) {
            return Ok(false);
        }
        match result {
            Ok(records) => {
                info!(records = records.len(), "received upload preview");
                self.load_side(Side::New, RawInput::Records(records))?;
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "upload preview failed");
                self.fail(SessionError::Upload(err))
            }
        }
    }

    /// Registers a merge and builds its payload from the new side's records.
    ///
    /// Refused with [`SessionError::Busy`] while another merge is outstanding.
    pub fn begin_merge(&mut self) -> Result<(Ticket, MergeRequest)> {
        self.last_error = None;
        let Some(records) = self.new.as_ref().map(|schema| schema.records().to_vec()) else {
            return self.fail(SessionError::SideNotLoaded(Side::New));
        };
        let ticket = match self.requests.begin(RequestKind::Merge) {
            Ok(ticket) => ticket,
            Err(err) => {
                warn!("merge rejected: another merge is in progress");
                return self.fail(err);
            }
        };
        self.merge_status = None;
        let request = self.build_merge_request(records);
        info!(
            mappings = request.field_mappings.mappings.len(),
            records = request.new_data.len(),
            "submitting merge"
        );
        Ok((ticket, request))
    }

    /// Applies a merge response. Returns `Ok(None)` if superseded.
    pub fn complete_merge(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<MergeResponse, ServiceError>,
    ) -> Result<Option<String>> {
        if !self.accept(ticket) {
            return Ok(None);
        }
        match result {
            Ok(response) => {
                info!(message = %response.message, "merge processed");
                self.merge_status = Some(response.message.clone());
                Ok(Some(response.message))
            }
            Err(err) => {
                warn!(error = %err, "merge failed");
                self.fail(SessionError::Merge(err))
            }
        }
    }

    /// Fetches the existing schema and applies it in one step.
    pub fn fetch_existing_schema<P: SchemaProvider + ?Sized>(&mut self, provider: &P) -> Result<()> {
        let ticket = self.begin_schema_fetch();
        let result = provider.fetch_schema();
        self.complete_schema_fetch(ticket, result).map(|_| ())
    }

    /// Uploads a file for preview and loads the result as the new side.
    pub fn upload_new<U: PreviewUploader + ?Sized>(&mut self, uploader: &U, path: &Path) -> Result<()> {
        let ticket = self.begin_upload();
        let result = uploader.upload_preview(path);
        self.complete_upload(ticket, result).map(|_| ())
    }

    /// Submits the merge and returns the service's message.
    pub fn process_merge<M: MergeService + ?Sized>(&mut self, service: &M) -> Result<String> {
        let (ticket, request) = self.begin_merge()?;
        let result = service.process_merge(&request);
        self.complete_merge(ticket, result)?
            .ok_or(SessionError::Busy(RequestKind::Merge))
    }

    // === Internals ===

    fn install_side(&mut self, schema: SchemaSide) {
        let side = schema.side();
        info!(
            side = %side,
            tables = schema.tables().len(),
            table = schema.active_table(),
            fields = schema.fields().len(),
            "loaded dataset"
        );
        let pending = RequestKind::loading(side);
        if self.requests.supersede(pending).is_some() {
            warn!(side = %side, request = %pending, "pending request superseded by load");
        }
        match side {
            Side::Existing => self.existing = Some(schema),
            Side::New => self.new = Some(schema),
        }
        self.reset_mapping_state();
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        let current = self.requests.finish(ticket);
        if !current {
            warn!(
                request = %ticket.kind,
                generation = ticket.generation,
                "discarding stale response"
            );
        }
        current
    }

    fn reset_mapping_state(&mut self) {
        self.mappings.clear();
        self.selection.reset();
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn fail<T>(&mut self, err: SessionError) -> Result<T> {
        self.last_error = Some(err.clone());
        Err(err)
    }
}
