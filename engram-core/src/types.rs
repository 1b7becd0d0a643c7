//! Core type definitions for the Engram memory system.
//!
//! Identities are opaque tokens and time is a plain number of seconds handed
//! in by the host, so nothing here depends on a particular engine's object
//! model or clock.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for any entity (NPC, player, creature) an agent can
/// remember something about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// The nil identity. Never refers to a real entity; a memory carrying it
    /// has no subject and is rejected by the controller.
    pub const NIL: Self = Self(Uuid::nil());

    /// Create a new random entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether this is the nil identity.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of observation a memory records, usually the trait or stat it
/// affects ("hostility", "generosity", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryCategory(String);

impl MemoryCategory {
    /// Create a category label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for MemoryCategory {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for MemoryCategory {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The dedup/merge key of a memory: one entry per `(subject, category)` per store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryKey {
    /// Who the memory is about.
    pub subject: EntityId,
    /// What kind of observation it is.
    pub category: MemoryCategory,
}

impl MemoryKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(subject: EntityId, category: MemoryCategory) -> Self {
        Self { subject, category }
    }
}

impl fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.category)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A point on the host's monotonic clock, in seconds.
///
/// The host decides the epoch (level load, server start, ...). Only
/// differences between timestamps are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(pub OrderedFloat<f64>);

impl Timestamp {
    /// The host clock's epoch.
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    /// Create a timestamp from seconds since the host epoch.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        Self(OrderedFloat(secs))
    }

    /// Seconds since the host epoch.
    #[must_use]
    pub fn as_secs(self) -> f64 {
        self.0.into_inner()
    }

    /// Seconds elapsed since `earlier`. Never negative: a clock that appears
    /// to run backwards counts as no time passing.
    #[must_use]
    pub fn seconds_since(self, earlier: Self) -> f64 {
        (self.as_secs() - earlier.as_secs()).max(0.0)
    }

    /// Whether this is a real point in time (not NaN or infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.as_secs().is_finite()
    }

    /// This timestamp shifted forward by `secs`.
    #[must_use]
    pub fn after(self, secs: f64) -> Self {
        Self::from_secs(self.as_secs() + secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_entity_is_detected() {
        assert!(EntityId::NIL.is_nil());
        assert!(!EntityId::new().is_nil());
    }

    #[test]
    fn blank_category_detected() {
        assert!(MemoryCategory::from("").is_blank());
        assert!(MemoryCategory::from("   ").is_blank());
        assert!(!MemoryCategory::from("trust").is_blank());
    }

    #[test]
    fn seconds_since_never_negative() {
        let early = Timestamp::from_secs(5.0);
        let late = Timestamp::from_secs(7.5);
        assert!((late.seconds_since(early) - 2.5).abs() < 1e-9);
        assert!(early.seconds_since(late).abs() < f64::EPSILON);
    }

    #[test]
    fn timestamps_order_by_time() {
        assert!(Timestamp::from_secs(1.0) < Timestamp::from_secs(2.0));
        assert_eq!(Timestamp::ZERO.after(3.0), Timestamp::from_secs(3.0));
    }
}
