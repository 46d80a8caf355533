#![deny(unsafe_code)]

//! Field correspondence state for interactive mapping.
//!
//! [`MappingStore`] holds the ordered mapping list, [`SelectionController`]
//! turns field clicks into additions and removals on it, and
//! [`connector_lines`] projects the list onto renderer-supplied field boxes.

pub mod connector;
pub mod selection;
pub mod store;

pub use connector::{CONTROL_OFFSET, Connector, Point, Rect, connector_lines};
pub use selection::{ClickOutcome, SelectionController, SelectionState};
pub use store::MappingStore;
