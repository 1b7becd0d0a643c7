//! Memory Controller: one agent's two-tier memory.
//!
//! ```text
//!  candidate ──▶ validate ──▶ short-term upsert ──▶ over capacity? ──no──▶ done
//!                                                        │ yes
//!                                                        ▼
//!                                        pick victim (largest |influence|)
//!                                                        │
//!                                                        ▼
//!                                    remove from short-term, upsert long-term
//!                                                        │
//!                                                        └──▶ (repeat check)
//! ```
//!
//! A full short-term store is never an error: overflow is always resolved
//! by promotion. Every query is read-only.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::MemoryConfig;
use crate::error::{EngramError, Result};
use crate::memory::Memory;
use crate::metrics::{spans, MemoryCounters};
use crate::promotion;
use crate::store::{BoundedStore, MemoryStore, Upsert};
use crate::types::{EntityId, MemoryKey, Timestamp};

/// What a single [`MemoryController::add_memory`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    /// Whether the candidate became a new short-term entry or merged into one.
    pub outcome: Upsert,
    /// Keys moved to long-term memory during the call, in promotion order.
    pub promoted: Vec<MemoryKey>,
}

impl AddReport {
    /// Whether the call promoted anything.
    #[must_use]
    pub fn promoted_any(&self) -> bool {
        !self.promoted.is_empty()
    }
}

/// Sizes of both tiers at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerStats {
    /// Entries in short-term memory.
    pub short_term_len: usize,
    /// Entries in long-term memory.
    pub long_term_len: usize,
    /// Short-term capacity.
    pub short_term_capacity: usize,
}

/// Owns one agent's short-term and long-term stores and the promotion policy.
#[derive(Debug)]
pub struct MemoryController {
    short_term: BoundedStore,
    long_term: MemoryStore,
    counters: Arc<MemoryCounters>,
}

impl MemoryController {
    /// Create a controller whose short-term store holds `short_term_capacity`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngramError::Config`] if `short_term_capacity` is zero.
    pub fn new(short_term_capacity: usize) -> Result<Self> {
        Ok(Self {
            short_term: BoundedStore::new(short_term_capacity)?,
            long_term: MemoryStore::new(),
            counters: Arc::new(MemoryCounters::new()),
        })
    }

    /// Create a controller from the `[memory]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngramError::Config`] if the config is invalid.
    pub fn from_config(config: &MemoryConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.short_term_capacity)
    }

    /// Report activity into a counter set shared with other controllers.
    #[must_use]
    pub fn with_counters(mut self, counters: Arc<MemoryCounters>) -> Self {
        self.counters = counters;
        self
    }

    /// The counters this controller reports into.
    #[must_use]
    pub fn counters(&self) -> &Arc<MemoryCounters> {
        &self.counters
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Record an observation.
    ///
    /// The candidate is stamped with `now`, merged into (or appended to)
    /// short-term memory, and then, while short-term is over capacity, the
    /// most significant short-term entry is promoted into long-term memory.
    ///
    /// # Errors
    ///
    /// Returns [`EngramError::InvalidArgument`] if the candidate is malformed
    /// or `now` is not finite. Neither store is touched in that case.
    pub fn add_memory(&mut self, mut candidate: Memory, now: Timestamp) -> Result<AddReport> {
        let _span = tracing::debug_span!(
            spans::MEMORY_ADD,
            subject = %candidate.subject(),
            category = %candidate.category()
        )
        .entered();

        let checked = if now.is_finite() {
            candidate.validate()
        } else {
            Err(EngramError::InvalidArgument(format!("non-finite timestamp {now}")))
        };
        if let Err(err) = checked {
            MemoryCounters::bump(&self.counters.candidates_rejected);
            warn!(error = %err, "Rejected candidate memory");
            return Err(err);
        }
        MemoryCounters::bump(&self.counters.candidates_added);

        candidate.touch(now);
        let outcome = self.short_term.upsert(candidate, now);
        match outcome {
            Upsert::Inserted => MemoryCounters::bump(&self.counters.short_term_inserts),
            Upsert::Merged => MemoryCounters::bump(&self.counters.short_term_merges),
        }
        trace!(?outcome, short_term = self.short_term.len(), "Upserted candidate");

        let mut promoted = Vec::new();
        while self.short_term.is_over_capacity() {
            let Some(key) = promotion::select_victim(self.short_term.all()) else {
                break;
            };
            self.promote(&key, now);
            promoted.push(key);
        }

        Ok(AddReport { outcome, promoted })
    }

    fn promote(&mut self, key: &MemoryKey, now: Timestamp) {
        let _span = tracing::debug_span!(spans::PROMOTION, key = %key).entered();

        for victim in self.short_term.take_where(|m| m.is_keyed(key.subject, &key.category)) {
            let influence = victim.influence();
            let outcome = self.long_term.upsert(victim, now);
            MemoryCounters::bump(&self.counters.promotions);
            if outcome == Upsert::Merged {
                MemoryCounters::bump(&self.counters.long_term_merges);
            }
            debug!(
                influence,
                ?outcome,
                short_term = self.short_term.len(),
                long_term = self.long_term.len(),
                "Promoted memory to long-term"
            );
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Every short-term entry, in store order.
    #[must_use]
    pub fn retrieve_short_term_memories(&self) -> &[Memory] {
        self.short_term.all()
    }

    /// Every long-term entry, in store order.
    #[must_use]
    pub fn retrieve_long_term_memories(&self) -> &[Memory] {
        self.long_term.all()
    }

    /// Short-term entries about `subject`; empty for an unknown subject.
    #[must_use]
    pub fn retrieve_short_term_memories_about(&self, subject: EntityId) -> Vec<&Memory> {
        self.short_term.all_about(subject)
    }

    /// Long-term entries about `subject`; empty for an unknown subject.
    #[must_use]
    pub fn retrieve_long_term_memories_about(&self, subject: EntityId) -> Vec<&Memory> {
        self.long_term.all_about(subject)
    }

    /// The short-term entry sharing `candidate`'s merge key, if any.
    #[must_use]
    pub fn retrieve_similar_short_term_memory(&self, candidate: &Memory) -> Option<&Memory> {
        self.short_term
            .find_by_key(candidate.subject(), candidate.category())
    }

    /// Entries about `subject` from both tiers whose cooldown has elapsed at
    /// `now`; short-term entries first.
    #[must_use]
    pub fn ready_memories_about(&self, subject: EntityId, now: Timestamp) -> Vec<&Memory> {
        let _span = tracing::trace_span!(spans::MEMORY_RETRIEVE, subject = %subject).entered();
        self.short_term
            .ready(now)
            .chain(self.long_term.ready(now))
            .filter(|m| m.subject() == subject)
            .collect()
    }

    /// The short-term store.
    #[must_use]
    pub fn short_term(&self) -> &BoundedStore {
        &self.short_term
    }

    /// The long-term store.
    #[must_use]
    pub fn long_term(&self) -> &MemoryStore {
        &self.long_term
    }

    /// Current tier sizes.
    #[must_use]
    pub fn stats(&self) -> ControllerStats {
        ControllerStats {
            short_term_len: self.short_term.len(),
            long_term_len: self.long_term.len(),
            short_term_capacity: self.short_term.capacity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: f64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    fn mem(subject: EntityId, category: &str, influence: f32) -> Memory {
        Memory::new(subject, category, influence, 0.0, at(0.0))
    }

    fn influences(memories: &[Memory]) -> Vec<f32> {
        memories.iter().map(Memory::influence).collect()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = MemoryController::new(0).expect_err("zero capacity");
        assert!(matches!(err, EngramError::Config(_)));
        assert!(MemoryController::from_config(&MemoryConfig { short_term_capacity: 0 }).is_err());
    }

    #[test]
    fn repeated_adds_merge_then_distinct_subject_appends() {
        let mut c = MemoryController::new(2).expect("controller");
        let (x, y) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(x, "hostility", 5.0), at(0.0)).expect("add");
        assert_eq!(influences(c.retrieve_short_term_memories()), vec![5.0]);

        let report = c.add_memory(mem(x, "hostility", 5.0), at(0.0)).expect("add");
        assert_eq!(report.outcome, Upsert::Merged);
        assert_eq!(influences(c.retrieve_short_term_memories()), vec![10.0]);

        c.add_memory(mem(y, "hostility", -5.0), at(0.0)).expect("add");
        assert_eq!(influences(c.retrieve_short_term_memories()), vec![10.0, -5.0]);
        assert!(c.retrieve_long_term_memories().is_empty());
    }

    #[test]
    fn overflow_promotes_largest_magnitude() {
        let mut c = MemoryController::new(2).expect("controller");
        let (x, z) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(z, "hostility", 50.0), at(0.0)).expect("add");
        c.add_memory(mem(z, "hostility", 50.0), at(0.0)).expect("add");
        assert_eq!(influences(c.retrieve_short_term_memories()), vec![100.0]);
        assert!(c.retrieve_long_term_memories().is_empty());

        let report = c.add_memory(mem(x, "hostility", 5.0), at(1.0)).expect("add");
        assert!(!report.promoted_any(), "two entries fit a capacity of two");

        let report = c.add_memory(mem(x, "fear", 1.0), at(2.0)).expect("add");
        assert_eq!(report.promoted.len(), 1);
        assert_eq!(report.promoted[0].subject, z);
        assert_eq!(influences(c.retrieve_short_term_memories()), vec![5.0, 1.0]);
        assert_eq!(influences(c.retrieve_long_term_memories()), vec![100.0]);
    }

    #[test]
    fn capacity_one_promotes_on_second_distinct_key() {
        let mut c = MemoryController::new(1).expect("controller");
        let (x, z) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(z, "hostility", 100.0), at(0.0)).expect("add");
        c.add_memory(mem(x, "hostility", 5.0), at(0.0)).expect("add");

        assert_eq!(influences(c.retrieve_short_term_memories()), vec![5.0]);
        assert_eq!(influences(c.retrieve_long_term_memories()), vec![100.0]);
    }

    #[test]
    fn newcomer_with_largest_magnitude_is_promoted_straight_away() {
        let mut c = MemoryController::new(1).expect("controller");
        let (x, z) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(x, "trust", 1.0), at(0.0)).expect("add");
        c.add_memory(mem(z, "hostility", -80.0), at(1.0)).expect("add");

        assert_eq!(c.retrieve_short_term_memories()[0].subject(), x);
        assert_eq!(c.retrieve_long_term_memories()[0].subject(), z);
    }

    #[test]
    fn promotion_merges_into_existing_long_term_entry() {
        let mut c = MemoryController::new(1).expect("controller");
        let (x, z) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(z, "hostility", 100.0), at(0.0)).expect("add");
        c.add_memory(mem(x, "trust", 1.0), at(1.0)).expect("add");
        c.add_memory(mem(z, "hostility", 40.0), at(2.0)).expect("add");

        let long_term = c.retrieve_long_term_memories();
        assert_eq!(long_term.len(), 1);
        assert!((long_term[0].influence() - 140.0).abs() < f32::EPSILON);
        assert_eq!(long_term[0].last_updated(), at(2.0));
        assert_eq!(c.counters().snapshot().long_term_merges, 1);
    }

    #[test]
    fn malformed_candidate_leaves_stores_untouched() {
        let mut c = MemoryController::new(1).expect("controller");
        c.add_memory(mem(EntityId::new(), "trust", 1.0), at(0.0)).expect("add");

        let err = c
            .add_memory(mem(EntityId::NIL, "trust", 9.0), at(1.0))
            .expect_err("nil subject");
        assert!(matches!(err, EngramError::InvalidArgument(_)));
        assert_eq!(c.stats().short_term_len, 1);
        assert_eq!(c.stats().long_term_len, 0);
        assert_eq!(c.counters().snapshot().candidates_rejected, 1);
    }

    #[test]
    fn non_finite_clock_is_rejected_without_mutation() {
        let mut c = MemoryController::new(1).expect("controller");
        let x = EntityId::new();

        for now in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = c
                .add_memory(Memory::new(x, "fear", 1.0, 0.5, Timestamp::ZERO), at(now))
                .expect_err("non-finite now");
            assert!(matches!(err, EngramError::InvalidArgument(_)));
        }
        assert_eq!(c.stats().short_term_len, 0);
        assert_eq!(c.counters().snapshot().candidates_rejected, 3);

        c.add_memory(Memory::new(x, "fear", 1.0, 0.5, Timestamp::ZERO), at(0.0)).expect("add");
        assert_eq!(c.ready_memories_about(x, at(1e6)).len(), 1);
    }

    #[test]
    fn repeated_max_influence_stays_finite() {
        let mut c = MemoryController::new(1).expect("controller");
        let (x, y) = (EntityId::new(), EntityId::new());

        c.add_memory(mem(x, "trust", f32::MAX), at(0.0)).expect("add");
        c.add_memory(mem(x, "trust", f32::MAX), at(0.0)).expect("add");
        assert_eq!(c.retrieve_short_term_memories()[0].influence(), f32::MAX);

        // A saturated entry promoted into long-term still merges to a number.
        c.add_memory(mem(y, "trust", 1.0), at(1.0)).expect("add");
        c.add_memory(mem(x, "trust", -f32::MAX), at(2.0)).expect("add");
        c.add_memory(mem(x, "trust", -f32::MAX), at(2.0)).expect("add");
        c.add_memory(mem(y, "fear", 1.0), at(3.0)).expect("add");
        assert!(c
            .retrieve_long_term_memories()
            .iter()
            .all(|m| m.influence().is_finite()));
    }

    #[test]
    fn add_stamps_and_gates_readiness() {
        let mut c = MemoryController::new(2).expect("controller");
        let x = EntityId::new();
        let candidate = Memory::new(x, "fear", 3.0, 0.1, at(0.0));

        c.add_memory(candidate.clone(), at(5.0)).expect("add");
        let stored = c.retrieve_similar_short_term_memory(&candidate).expect("stored");
        assert_eq!(stored.last_updated(), at(5.0));
        assert!(!stored.is_ready(at(5.0)));
        assert!(stored.is_ready(at(5.11)));
    }

    #[test]
    fn queries_about_unknown_subject_are_empty() {
        let mut c = MemoryController::new(2).expect("controller");
        c.add_memory(mem(EntityId::new(), "trust", 1.0), at(0.0)).expect("add");

        let stranger = EntityId::new();
        assert!(c.retrieve_short_term_memories_about(stranger).is_empty());
        assert!(c.retrieve_long_term_memories_about(stranger).is_empty());
        assert!(c.ready_memories_about(stranger, at(10.0)).is_empty());
        assert!(c.retrieve_similar_short_term_memory(&mem(stranger, "trust", 1.0)).is_none());
    }

    #[test]
    fn ready_memories_span_both_tiers() {
        let mut c = MemoryController::new(1).expect("controller");
        let x = EntityId::new();

        c.add_memory(Memory::new(x, "hostility", 50.0, 1.0, at(0.0)), at(0.0)).expect("add");
        c.add_memory(Memory::new(x, "trust", 2.0, 1.0, at(0.0)), at(0.5)).expect("add");

        assert_eq!(c.stats().long_term_len, 1);
        assert!(c.ready_memories_about(x, at(0.6)).is_empty());
        assert_eq!(c.ready_memories_about(x, at(1.0)).len(), 1);

        let ready: Vec<&str> = c
            .ready_memories_about(x, at(2.0))
            .into_iter()
            .map(|m| m.category().as_str())
            .collect();
        assert_eq!(ready, vec!["trust", "hostility"]);
    }

    #[test]
    fn shared_counters_aggregate_controllers() {
        let counters = Arc::new(MemoryCounters::new());
        let mut a = MemoryController::new(1).expect("a").with_counters(Arc::clone(&counters));
        let mut b = MemoryController::new(1).expect("b").with_counters(Arc::clone(&counters));

        a.add_memory(mem(EntityId::new(), "trust", 1.0), at(0.0)).expect("add");
        b.add_memory(mem(EntityId::new(), "trust", 1.0), at(0.0)).expect("add");

        assert_eq!(counters.snapshot().candidates_added, 2);
        assert_eq!(counters.snapshot().short_term_inserts, 2);
    }
}
