//! Single-entry reducer over session events.

use fieldmap_ingest::RawInput;
use fieldmap_map::ClickOutcome;
use fieldmap_model::{Mapping, MergeResponse, Record, Side};

use crate::error::{Result, ServiceError};
use crate::request::Ticket;
use crate::state::SessionState;

/// Everything that can happen to a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Load { side: Side, raw: RawInput },
    SelectTable { side: Side, table: String },
    Click { side: Side, field: String },
    RemoveMapping { index: usize },
    SchemaFetched {
        ticket: Ticket,
        result: std::result::Result<Vec<String>, ServiceError>,
    },
    PreviewUploaded {
        ticket: Ticket,
        result: std::result::Result<Vec<Record>, ServiceError>,
    },
    MergeProcessed {
        ticket: Ticket,
        result: std::result::Result<MergeResponse, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Loaded(Side),
    TableSelected(Side),
    Clicked(ClickOutcome),
    MappingRemoved(Option<Mapping>),
    /// A response was applied to the session.
    ResponseApplied,
    /// A response arrived after its request was superseded and was dropped.
    ResponseDiscarded,
    Merged(String),
}

impl SessionState {
    /// Applies one event. Errors are also retained as [`SessionState::last_error`].
    pub fn apply(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        match event {
            SessionEvent::Load { side, raw } => {
                self.load_side(side, raw)?;
                Ok(EventOutcome::Loaded(side))
            }
            SessionEvent::SelectTable { side, table } => {
                self.select_table(side, &table)?;
                Ok(EventOutcome::TableSelected(side))
            }
            SessionEvent::Click { side, field } => Ok(EventOutcome::Clicked(self.click(side, &field))),
            SessionEvent::RemoveMapping { index } => {
                Ok(EventOutcome::MappingRemoved(self.remove_mapping(index)))
            }
            SessionEvent::SchemaFetched { ticket, result } => {
                Ok(applied(self.complete_schema_fetch(ticket, result)?))
            }
            SessionEvent::PreviewUploaded { ticket, result } => {
                Ok(applied(self.complete_upload(ticket, result)?))
            }
            SessionEvent::MergeProcessed { ticket, result } => {
                Ok(match self.complete_merge(ticket, result)? {
                    Some(message) => EventOutcome::Merged(message),
                    None => EventOutcome::ResponseDiscarded,
                })
            }
        }
    }
}

fn applied(current: bool) -> EventOutcome {
    if current {
        EventOutcome::ResponseApplied
    } else {
        EventOutcome::ResponseDiscarded
    }
}
