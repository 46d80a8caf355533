//! Field correspondence types.

use serde::{Deserialize, Serialize};

use crate::side::Side;

/// A declared correspondence between an existing-side field and a new-side field.
///
/// Names are scoped to whichever tables are active on each side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mapping {
    pub existing: String,
    pub new: String,
}

impl Mapping {
    pub fn new(existing: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            existing: existing.into(),
            new: new.into(),
        }
    }

    /// The field name this mapping holds on `side`.
    pub fn field(&self, side: Side) -> &str {
        match side {
            Side::Existing => &self.existing,
            Side::New => &self.new,
        }
    }

    pub fn references(&self, side: Side, name: &str) -> bool {
        self.field(side) == name
    }
}

/// Wire wrapper used as `field_mappings` in merge requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSet {
    pub mappings: Vec<Mapping>,
}

impl From<Vec<Mapping>> for MappingSet {
    fn from(mappings: Vec<Mapping>) -> Self {
        Self { mappings }
    }
}
