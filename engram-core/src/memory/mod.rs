//! Memory: one remembered fact about a subject.
//!
//! A memory's shape (`subject`, `category`, `cooldown`) is fixed at creation;
//! only its influence and last-update stamp change, and only through
//! [`Memory::merge`]. Readiness is derived from the caller's clock on every
//! read and never stored.
//!
//! ```text
//!            cooldown elapses
//!   Fresh ───────────────────▶ Ready
//!     ▲                          │
//!     └────────── merge ─────────┘
//! ```

pub mod definition;

pub use definition::MemoryDefinition;

use serde::{Deserialize, Serialize};

use crate::error::{EngramError, Result};
use crate::types::{EntityId, MemoryCategory, MemoryKey, Timestamp};

/// Readiness state of a memory at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryState {
    /// Created or merged less than `cooldown` ago.
    Fresh,
    /// The cooldown has elapsed; decision logic may act on it.
    Ready,
}

/// A single remembered fact about a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    subject: EntityId,
    category: MemoryCategory,
    influence: f32,
    cooldown: f64,
    last_updated: Timestamp,
}

impl Memory {
    /// Create a memory stamped at `created_at`.
    ///
    /// No validation happens here; the controller calls [`Memory::validate`]
    /// before storing anything.
    #[must_use]
    pub fn new(
        subject: EntityId,
        category: impl Into<MemoryCategory>,
        influence: f32,
        cooldown_secs: f64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            subject,
            category: category.into(),
            influence,
            cooldown: cooldown_secs,
            last_updated: created_at,
        }
    }

    /// Who this memory is about.
    #[must_use]
    pub fn subject(&self) -> EntityId {
        self.subject
    }

    /// What kind of observation this is.
    #[must_use]
    pub fn category(&self) -> &MemoryCategory {
        &self.category
    }

    /// Signed strength of this memory's effect on the agent's disposition.
    #[must_use]
    pub fn influence(&self) -> f32 {
        self.influence
    }

    /// Seconds after the last update before the memory is ready again.
    #[must_use]
    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    /// When the memory was stored or last merged.
    #[must_use]
    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// The `(subject, category)` merge key.
    #[must_use]
    pub fn key(&self) -> MemoryKey {
        MemoryKey::new(self.subject, self.category.clone())
    }

    /// Whether this memory shares its merge key with `other`.
    #[must_use]
    pub fn same_key(&self, other: &Self) -> bool {
        self.is_keyed(other.subject, &other.category)
    }

    /// Whether this memory has the given merge key.
    #[must_use]
    pub fn is_keyed(&self, subject: EntityId, category: &MemoryCategory) -> bool {
        self.subject == subject && self.category == *category
    }

    /// Fold `other` into this memory: influences add up, the update stamp
    /// moves to `now`, the existing cooldown is kept. The summed influence
    /// saturates at `±f32::MAX`.
    ///
    /// Callers only merge memories with the same key; merging across keys
    /// is a logic error and is caught in debug builds.
    pub fn merge(&mut self, other: &Self, now: Timestamp) {
        debug_assert!(self.same_key(other), "merging memories with different keys");
        self.influence = (self.influence + other.influence).clamp(-f32::MAX, f32::MAX);
        self.last_updated = now;
    }

    /// The moment the cooldown runs out.
    #[must_use]
    pub fn ready_at(&self) -> Timestamp {
        self.last_updated.after(self.cooldown)
    }

    /// Whether the cooldown has elapsed since the last update. A `now`
    /// earlier than the last update counts as no time passing.
    #[must_use]
    pub fn is_ready(&self, now: Timestamp) -> bool {
        now.max(self.last_updated) >= self.ready_at()
    }

    /// The readiness state at `now`.
    #[must_use]
    pub fn state(&self, now: Timestamp) -> MemoryState {
        if self.is_ready(now) {
            MemoryState::Ready
        } else {
            MemoryState::Fresh
        }
    }

    /// Seconds left until the memory becomes ready (0 when ready).
    #[must_use]
    pub fn remaining_cooldown(&self, now: Timestamp) -> f64 {
        if self.is_ready(now) {
            0.0
        } else {
            self.ready_at().seconds_since(now.max(self.last_updated))
        }
    }

    /// Re-stamp the memory as of `now` without touching anything else.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.last_updated = now;
    }

    /// Check that the memory is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`EngramError::InvalidArgument`] if the subject is nil, the
    /// category is blank, the influence is not finite, or the cooldown is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.subject.is_nil() {
            return Err(EngramError::InvalidArgument(
                "memory has no subject".to_string(),
            ));
        }
        if self.category.is_blank() {
            return Err(EngramError::InvalidArgument(format!(
                "memory about {} has a blank category",
                self.subject
            )));
        }
        if !self.influence.is_finite() {
            return Err(EngramError::InvalidArgument(format!(
                "memory {} has non-finite influence {}",
                self.key(),
                self.influence
            )));
        }
        if !self.cooldown.is_finite() || self.cooldown < 0.0 {
            return Err(EngramError::InvalidArgument(format!(
                "memory {} has invalid cooldown {}",
                self.key(),
                self.cooldown
            )));
        }
        Ok(())
    }
}
