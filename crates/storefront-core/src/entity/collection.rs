//! Ordered, id-unique record collection.
//!
//! Mutation rules:
//! - `replace_all` swaps the whole sequence (full replace, not merge)
//! - `append` adds at the end
//! - `replace` swaps the matching record in place, keeping its position
//! - `remove` drops the matching record
//!
//! Ids stay unique across every sequence of these calls.

use super::id::EntityId;
use super::model::Entity;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityCollection<E: Entity> {
    records: Vec<E>,
}

impl<E: Entity> Default for EntityCollection<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E: Entity> EntityCollection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<E>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(records);
        collection
    }

    /// Replaces the entire sequence.
    ///
    /// If the input repeats an id, the first occurrence wins and the rest are
    /// dropped. Returns the number of dropped duplicates.
    pub fn replace_all(&mut self, records: Vec<E>) -> usize {
        let incoming = records.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.records = records
            .into_iter()
            .filter(|record| seen.insert(record.id().clone()))
            .collect();

        let dropped = incoming - self.records.len();
        if dropped > 0 {
            tracing::warn!(
                "[EntityCollection] Dropped {} duplicate {} record(s)",
                dropped,
                E::KIND
            );
        }
        dropped
    }

    /// Appends a record at the end.
    ///
    /// A record whose id is already present replaces the existing entry in
    /// place instead, so ids stay unique. Returns `true` if the record was
    /// appended; the caller decides whether the replacement is worth logging.
    pub fn append(&mut self, record: E) -> bool {
        if let Some(index) = self.position(record.id()) {
            self.records[index] = record;
            return false;
        }
        self.records.push(record);
        true
    }

    /// Replaces the record with the same id, preserving its position.
    ///
    /// Returns `false` and leaves the collection untouched when no record
    /// has that id.
    pub fn replace(&mut self, record: E) -> bool {
        match self.position(record.id()) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        self.records.len() != before
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.records
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.records.iter().map(|record| record.id().clone()).collect()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.records
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
