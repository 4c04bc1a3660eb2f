//! Keyed placement collection with upsert-by-identity semantics.

use tapresearch_common::Placement;

/// At most one record per placement identifier. Iteration order is the
/// order of the latest upserts: a replaced placement moves to the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementRegistry {
    placements: Vec<Placement>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove any record sharing `placement.identifier`, then append
    /// `placement`. Returns the record that was replaced.
    pub fn upsert(&mut self, placement: Placement) -> Option<Placement> {
        let replaced = self
            .placements
            .iter()
            .position(|p| p.identifier == placement.identifier)
            .map(|idx| self.placements.remove(idx));
        self.placements.push(placement);
        replaced
    }

    /// Owned copy of the current records, in iteration order.
    pub fn snapshot(&self) -> Vec<Placement> {
        self.placements.clone()
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, identifier: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.identifier == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn first(&self) -> Option<&Placement> {
        self.placements.first()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }
}
