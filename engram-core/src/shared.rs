//! Thread-safe handle to a [`MemoryController`].
//!
//! Agents that are ticked from a single thread use [`MemoryController`]
//! directly. Hosts that feed observations from several threads share a
//! [`SharedMemoryController`] instead: every `add_memory` holds the write
//! lock for the whole upsert-and-promote sequence, and every query copies its
//! result out under one read lock, so a reader never sees a half-promoted
//! state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::MemoryConfig;
use crate::controller::{AddReport, ControllerStats, MemoryController};
use crate::error::Result;
use crate::memory::Memory;
use crate::types::{EntityId, Timestamp};

/// Cloneable, lock-protected controller handle.
#[derive(Debug, Clone)]
pub struct SharedMemoryController {
    inner: Arc<RwLock<MemoryController>>,
}

impl SharedMemoryController {
    /// Wrap an existing controller.
    #[must_use]
    pub fn from_controller(controller: MemoryController) -> Self {
        Self {
            inner: Arc::new(RwLock::new(controller)),
        }
    }

    /// Create a shared controller with the given short-term capacity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngramError::Config`] if `short_term_capacity` is zero.
    pub fn new(short_term_capacity: usize) -> Result<Self> {
        MemoryController::new(short_term_capacity).map(Self::from_controller)
    }

    /// Create a shared controller from the `[memory]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngramError::Config`] if the config is invalid.
    pub fn from_config(config: &MemoryConfig) -> Result<Self> {
        MemoryController::from_config(config).map(Self::from_controller)
    }

    /// See [`MemoryController::add_memory`]. Serialised with every other
    /// mutation on this handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngramError::InvalidArgument`] for a malformed candidate.
    pub fn add_memory(&self, candidate: Memory, now: Timestamp) -> Result<AddReport> {
        self.inner.write().add_memory(candidate, now)
    }

    /// Run several queries against one consistent view.
    pub fn read<R>(&self, f: impl FnOnce(&MemoryController) -> R) -> R {
        f(&self.inner.read())
    }

    /// Snapshot of [`MemoryController::retrieve_short_term_memories`].
    #[must_use]
    pub fn retrieve_short_term_memories(&self) -> Vec<Memory> {
        self.read(|c| c.retrieve_short_term_memories().to_vec())
    }

    /// Snapshot of [`MemoryController::retrieve_long_term_memories`].
    #[must_use]
    pub fn retrieve_long_term_memories(&self) -> Vec<Memory> {
        self.read(|c| c.retrieve_long_term_memories().to_vec())
    }

    /// Snapshot of [`MemoryController::retrieve_short_term_memories_about`].
    #[must_use]
    pub fn retrieve_short_term_memories_about(&self, subject: EntityId) -> Vec<Memory> {
        self.read(|c| owned(c.retrieve_short_term_memories_about(subject)))
    }

    /// Snapshot of [`MemoryController::retrieve_long_term_memories_about`].
    #[must_use]
    pub fn retrieve_long_term_memories_about(&self, subject: EntityId) -> Vec<Memory> {
        self.read(|c| owned(c.retrieve_long_term_memories_about(subject)))
    }

    /// Snapshot of [`MemoryController::retrieve_similar_short_term_memory`].
    #[must_use]
    pub fn retrieve_similar_short_term_memory(&self, candidate: &Memory) -> Option<Memory> {
        self.read(|c| c.retrieve_similar_short_term_memory(candidate).cloned())
    }

    /// Snapshot of [`MemoryController::ready_memories_about`].
    #[must_use]
    pub fn ready_memories_about(&self, subject: EntityId, now: Timestamp) -> Vec<Memory> {
        self.read(|c| owned(c.ready_memories_about(subject, now)))
    }

    /// See [`MemoryController::stats`].
    #[must_use]
    pub fn stats(&self) -> ControllerStats {
        self.read(MemoryController::stats)
    }
}

fn owned(memories: Vec<&Memory>) -> Vec<Memory> {
    memories.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = SharedMemoryController::new(2).expect("controller");
        let b = a.clone();
        let subject = EntityId::new();

        a.add_memory(Memory::new(subject, "trust", 1.0, 0.0, Timestamp::ZERO), Timestamp::ZERO)
            .expect("add");

        assert_eq!(b.retrieve_short_term_memories_about(subject).len(), 1);
        assert_eq!(b.stats().short_term_len, 1);
    }

    #[test]
    fn read_gives_one_consistent_view() {
        let shared = SharedMemoryController::new(1).expect("controller");
        let now = Timestamp::ZERO;
        shared
            .add_memory(Memory::new(EntityId::new(), "a", 9.0, 0.0, now), now)
            .expect("add");
        shared
            .add_memory(Memory::new(EntityId::new(), "a", 1.0, 0.0, now), now)
            .expect("add");

        let total = shared.read(|c| {
            c.retrieve_short_term_memories().len() + c.retrieve_long_term_memories().len()
        });
        assert_eq!(total, 2);
    }
}
