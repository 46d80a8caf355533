//! Generation-tagged tracking of outstanding backend requests.
//!
//! Each request gets a [`Ticket`] from one monotonically increasing counter.
//! Only the ticket currently registered for its kind may apply its response;
//! anything else arrived after being superseded and is dropped.

use std::collections::BTreeMap;
use std::fmt;

use fieldmap_model::Side;

use crate::error::{Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    /// `GET /sales-schema`, feeds the existing side.
    SchemaFetch,
    /// `POST /upload-preview`, feeds the new side.
    UploadPreview,
    /// `POST /process-merge-mappings`.
    Merge,
}

impl RequestKind {
    /// The request kind that loads data into `side`.
    pub const fn loading(side: Side) -> Self {
        match side {
            Side::Existing => Self::SchemaFetch,
            Side::New => Self::UploadPreview,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SchemaFetch => "schema fetch",
            Self::UploadPreview => "upload preview",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_generation: u64,
    outstanding: BTreeMap<RequestKind, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request of `kind`.
    ///
    /// Loads supersede any outstanding request of the same kind. A merge is
    /// refused while another merge is outstanding.
    pub fn begin(&mut self, kind: RequestKind) -> Result<Ticket> {
        if kind == RequestKind::Merge && self.outstanding.contains_key(&kind) {
            return Err(SessionError::Busy(kind));
        }
        Ok(self.begin_superseding(kind))
    }

    /// Registers a new request of `kind`, superseding any outstanding one.
    pub fn begin_superseding(&mut self, kind: RequestKind) -> Ticket {
        self.last_generation += 1;
        self.outstanding.insert(kind, self.last_generation);
        Ticket {
            kind,
            generation: self.last_generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.outstanding.get(&ticket.kind) == Some(&ticket.generation)
    }

    /// Clears the busy flag for `ticket`. Returns false if it was superseded.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.outstanding.remove(&ticket.kind);
            true
        } else {
            false
        }
    }

    /// Drops any outstanding request of `kind` so its response is ignored.
    pub fn supersede(&mut self, kind: RequestKind) -> Option<u64> {
        self.outstanding.remove(&kind)
    }

    pub fn is_busy(&self, kind: RequestKind) -> bool {
        self.outstanding.contains_key(&kind)
    }

    pub fn any_busy(&self) -> bool {
        !self.outstanding.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_across_kinds() {
        let mut tracker = RequestTracker::new();
        let a = tracker.begin(RequestKind::SchemaFetch).unwrap();
        let b = tracker.begin(RequestKind::UploadPreview).unwrap();
        assert!(b.generation > a.generation);
        assert!(tracker.is_current(a));
        assert!(tracker.is_current(b));
    }

    #[test]
    fn newer_load_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin(RequestKind::UploadPreview).unwrap();
        let second = tracker.begin(RequestKind::UploadPreview).unwrap();
        assert!(!tracker.finish(first));
        assert!(tracker.is_busy(RequestKind::UploadPreview));
        assert!(tracker.finish(second));
        assert!(!tracker.is_busy(RequestKind::UploadPreview));
    }

    #[test]
    fn second_merge_is_rejected() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.begin(RequestKind::Merge).unwrap();
        assert_eq!(
            tracker.begin(RequestKind::Merge),
            Err(SessionError::Busy(RequestKind::Merge))
        );
        assert!(tracker.finish(ticket));
        assert!(tracker.begin(RequestKind::Merge).is_ok());
    }

    #[test]
    fn supersede_invalidates_ticket() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.begin(RequestKind::SchemaFetch).unwrap();
        assert_eq!(tracker.supersede(RequestKind::SchemaFetch), Some(ticket.generation));
        assert!(!tracker.finish(ticket));
        assert!(!tracker.any_busy());
    }
}
