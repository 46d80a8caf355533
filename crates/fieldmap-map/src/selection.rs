//! Click-driven selection machine.
//!
//! One event type drives everything: clicking an unmapped field arms it,
//! clicking a field on the other side completes a mapping, clicking the same
//! side again cancels, and clicking an already-mapped field deletes its first
//! mapping.

use tracing::debug;

use fieldmap_model::{FieldRef, Mapping, Side};

use crate::store::MappingStore;

/// Selection cursor of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// One field is waiting for a partner on the other side.
    Armed(FieldRef),
}

impl SelectionState {
    pub fn armed(&self) -> Option<&FieldRef> {
        match self {
            Self::Idle => None,
            Self::Armed(field) => Some(field),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The field is now pending.
    Armed(FieldRef),
    /// A new mapping was appended at `index`.
    Mapped { mapping: Mapping, index: usize },
    /// The pair already existed; the store is unchanged.
    AlreadyMapped(Mapping),
    /// The first mapping referencing the clicked field was removed.
    Removed { mapping: Mapping, index: usize },
    /// A second click on the pending field's side dropped the pending field.
    Discarded(FieldRef),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// True if `name` on `side` is the pending field.
    pub fn is_selected(&self, side: Side, name: &str) -> bool {
        self.state
            .armed()
            .is_some_and(|field| field.side == side && field.name == name)
    }

    /// Applies one click. Always leaves the machine `Idle` except when arming.
    pub fn click(&mut self, field: FieldRef, store: &mut MappingStore) -> ClickOutcome {
        // Mapped fields toggle off first, even with another field pending.
        if let Some(index) = store.position_of(&field.name, field.side) {
            self.state = SelectionState::Idle;
            if let Some(mapping) = store.remove_at(index) {
                debug!(field = %field, index, "removed mapping");
                return ClickOutcome::Removed { mapping, index };
            }
        }

        match std::mem::take(&mut self.state) {
            SelectionState::Idle => {
                debug!(field = %field, "armed field");
                self.state = SelectionState::Armed(field.clone());
                ClickOutcome::Armed(field)
            }
            SelectionState::Armed(pending) if pending.side == field.side => {
                debug!(pending = %pending, clicked = %field, "same-side click discarded selection");
                ClickOutcome::Discarded(pending)
            }
            SelectionState::Armed(pending) => {
                let (existing, new) = match pending.side {
                    Side::Existing => (pending.name, field.name),
                    Side::New => (field.name, pending.name),
                };
                let mapping = Mapping::new(existing, new);
                if store.add(mapping.existing.clone(), mapping.new.clone()) {
                    let index = store.len() - 1;
                    debug!(existing = %mapping.existing, new = %mapping.new, index, "mapped fields");
                    ClickOutcome::Mapped { mapping, index }
                } else {
                    ClickOutcome::AlreadyMapped(mapping)
                }
            }
        }
    }
}
