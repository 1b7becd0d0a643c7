//! Bounded store: the short-term tier.
//!
//! The store itself never refuses an insert. It reports when it has grown
//! past its capacity and leaves it to the owner (the controller) to relieve
//! the pressure by promotion.

use std::num::NonZeroUsize;

use super::{MemoryStore, Upsert};
use crate::error::{EngramError, Result};
use crate::memory::Memory;
use crate::types::{EntityId, MemoryCategory, Timestamp};

/// A [`MemoryStore`] with a capacity.
#[derive(Debug, Clone)]
pub struct BoundedStore {
    inner: MemoryStore,
    capacity: NonZeroUsize,
}

impl BoundedStore {
    /// Create an empty store holding at most `capacity` entries at rest.
    ///
    /// # Errors
    ///
    /// Returns [`EngramError::Config`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            EngramError::Config("short-term capacity must be at least 1".to_string())
        })?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create an empty store with an already-checked capacity.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            inner: MemoryStore::new(),
            capacity,
        }
    }

    /// Maximum number of entries held once promotion has run.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Whether the store holds more entries than its capacity.
    #[must_use]
    pub fn is_over_capacity(&self) -> bool {
        self.inner.len() > self.capacity.get()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// See [`MemoryStore::find_by_key`].
    #[must_use]
    pub fn find_by_key(&self, subject: EntityId, category: &MemoryCategory) -> Option<&Memory> {
        self.inner.find_by_key(subject, category)
    }

    /// See [`MemoryStore::upsert`]. May leave the store over capacity.
    pub fn upsert(&mut self, memory: Memory, now: Timestamp) -> Upsert {
        self.inner.upsert(memory, now)
    }

    /// See [`MemoryStore::all_about`].
    #[must_use]
    pub fn all_about(&self, subject: EntityId) -> Vec<&Memory> {
        self.inner.all_about(subject)
    }

    /// See [`MemoryStore::all`].
    #[must_use]
    pub fn all(&self) -> &[Memory] {
        self.inner.all()
    }

    /// See [`MemoryStore::iter`].
    pub fn iter(&self) -> std::slice::Iter<'_, Memory> {
        self.inner.iter()
    }

    /// See [`MemoryStore::ready`].
    pub fn ready(&self, now: Timestamp) -> impl Iterator<Item = &Memory> {
        self.inner.ready(now)
    }

    /// See [`MemoryStore::take_where`].
    pub fn take_where<F>(&mut self, predicate: F) -> Vec<Memory>
    where
        F: FnMut(&Memory) -> bool,
    {
        self.inner.take_where(predicate)
    }
}

impl<'a> IntoIterator for &'a BoundedStore {
    type Item = &'a Memory;
    type IntoIter = std::slice::Iter<'a, Memory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
