//! Memory stores: ordered, deduplicated collections of [`Memory`].
//!
//! [`MemoryStore`] is the unbounded variant used for long-term memory.
//! [`BoundedStore`] wraps it with a capacity for short-term memory. Both
//! share the same merge semantics: at most one entry per `(subject, category)`,
//! a repeated key merges into the existing entry in place, a new key is
//! appended at the end.

pub mod bounded;

pub use bounded::BoundedStore;

use std::collections::HashMap;

use crate::memory::Memory;
use crate::types::{EntityId, MemoryCategory, MemoryKey, Timestamp};

/// What [`MemoryStore::upsert`] did with the incoming memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No entry had the key; the memory was appended.
    Inserted,
    /// An entry with the key existed and absorbed the memory.
    Merged,
}

/// An unbounded, insertion-ordered store with one entry per merge key.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<Memory>,
    /// Merge key → position in `entries`.
    index: HashMap<MemoryKey, usize>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The unique entry with the given key, if any.
    #[must_use]
    pub fn find_by_key(&self, subject: EntityId, category: &MemoryCategory) -> Option<&Memory> {
        self.index
            .get(&MemoryKey::new(subject, category.clone()))
            .map(|&pos| &self.entries[pos])
    }

    /// Merge `memory` into the entry sharing its key, or append it.
    ///
    /// A merge keeps the existing entry's position and stamps it with `now`.
    /// An appended memory keeps its own stamp.
    pub fn upsert(&mut self, memory: Memory, now: Timestamp) -> Upsert {
        let key = memory.key();
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].merge(&memory, now);
            Upsert::Merged
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push(memory);
            Upsert::Inserted
        }
    }

    /// Every entry about `subject`, in store order.
    #[must_use]
    pub fn all_about(&self, subject: EntityId) -> Vec<&Memory> {
        self.entries.iter().filter(|m| m.subject() == subject).collect()
    }

    /// Full snapshot in store order.
    #[must_use]
    pub fn all(&self) -> &[Memory] {
        &self.entries
    }

    /// Iterate over entries in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Memory> {
        self.entries.iter()
    }

    /// Entries whose cooldown has elapsed at `now`, in store order.
    pub fn ready(&self, now: Timestamp) -> impl Iterator<Item = &Memory> {
        self.entries.iter().filter(move |m| m.is_ready(now))
    }

    /// Remove and return every entry matching `predicate`.
    ///
    /// Remaining entries keep their relative order.
    pub fn take_where<F>(&mut self, mut predicate: F) -> Vec<Memory>
    where
        F: FnMut(&Memory) -> bool,
    {
        let (taken, kept): (Vec<Memory>, Vec<Memory>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|m| predicate(m));
        self.entries = kept;
        if !taken.is_empty() {
            self.reindex();
        }
        taken
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, memory) in self.entries.iter().enumerate() {
            self.index.insert(memory.key(), pos);
        }
    }
}

impl<'a> IntoIterator for &'a MemoryStore {
    type Item = &'a Memory;
    type IntoIter = std::slice::Iter<'a, Memory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
