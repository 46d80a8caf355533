//! Ordered mapping list with pair uniqueness.

use fieldmap_model::{Mapping, Side};

/// Insertion-ordered mappings. No two entries are the same pair.
///
/// A field name may still appear in several mappings on the same side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStore {
    mappings: Vec<Mapping>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the pair unless it is already stored. Returns whether it was added.
    pub fn add(&mut self, existing: impl Into<String>, new: impl Into<String>) -> bool {
        let mapping = Mapping::new(existing, new);
        if self.mappings.contains(&mapping) {
            return false;
        }
        self.mappings.push(mapping);
        true
    }

    /// Removes the entry at `index`; out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Mapping> {
        (index < self.mappings.len()).then(|| self.mappings.remove(index))
    }

    /// True if any mapping holds `name` on `side`, whatever its partner.
    pub fn is_referenced(&self, name: &str, side: Side) -> bool {
        self.position_of(name, side).is_some()
    }

    /// Index of the first mapping holding `name` on `side`.
    pub fn position_of(&self, name: &str, side: Side) -> Option<usize> {
        self.mappings.iter().position(|m| m.references(side, name))
    }

    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    pub fn as_slice(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn to_vec(&self) -> Vec<Mapping> {
        self.mappings.clone()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
