//! Runtime Metrics & Instrumentation
//!
//! Lightweight counters for the memory controllers of every agent in a
//! process, plus the span names used with `tracing`.
//!
//! Design: lock-free `AtomicU64` counters. A host shares one
//! [`MemoryCounters`] between all its agents' controllers via `Arc` and reads
//! it on dashboard export; counters never influence controller behavior.

use std::sync::atomic::{AtomicU64, Ordering};

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters for controller activity.
#[derive(Debug)]
pub struct MemoryCounters {
    /// Candidates accepted by `add_memory`.
    pub candidates_added: AtomicU64,
    /// Candidates that created a new short-term entry.
    pub short_term_inserts: AtomicU64,
    /// Candidates merged into an existing short-term entry.
    pub short_term_merges: AtomicU64,
    /// Entries moved from short-term to long-term.
    pub promotions: AtomicU64,
    /// Promotions that merged into an existing long-term entry.
    pub long_term_merges: AtomicU64,
    /// Candidates rejected as malformed.
    pub candidates_rejected: AtomicU64,
}

impl MemoryCounters {
    /// Zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            candidates_added: AtomicU64::new(0),
            short_term_inserts: AtomicU64::new(0),
            short_term_merges: AtomicU64::new(0),
            promotions: AtomicU64::new(0),
            long_term_merges: AtomicU64::new(0),
            candidates_rejected: AtomicU64::new(0),
        }
    }

    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter at once.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            candidates_added: self.candidates_added.load(Ordering::Relaxed),
            short_term_inserts: self.short_term_inserts.load(Ordering::Relaxed),
            short_term_merges: self.short_term_merges.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            long_term_merges: self.long_term_merges.load(Ordering::Relaxed),
            candidates_rejected: self.candidates_rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoryCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain counter values, detached from the atomics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Candidates accepted.
    pub candidates_added: u64,
    /// New short-term entries.
    pub short_term_inserts: u64,
    /// Short-term merges.
    pub short_term_merges: u64,
    /// Promotions to long-term.
    pub promotions: u64,
    /// Long-term merges caused by promotion.
    pub long_term_merges: u64,
    /// Rejected candidates.
    pub candidates_rejected: u64,
}

impl CounterSnapshot {
    /// Render in the Prometheus text exposition format.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let rows: [(&str, &str, u64); 6] = [
            ("engram_candidates_added_total", "Candidate memories accepted", self.candidates_added),
            ("engram_short_term_inserts_total", "New short-term entries", self.short_term_inserts),
            ("engram_short_term_merges_total", "Candidates merged into short-term entries", self.short_term_merges),
            ("engram_promotions_total", "Entries promoted to long-term memory", self.promotions),
            ("engram_long_term_merges_total", "Promotions merged into long-term entries", self.long_term_merges),
            ("engram_candidates_rejected_total", "Malformed candidates rejected", self.candidates_rejected),
        ];

        let mut out = String::new();
        for (name, help, value) in rows {
            out.push_str(&format!(
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"
            ));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tracing Span Names
// ---------------------------------------------------------------------------

/// Span names used with `tracing` spans.
pub mod spans {
    /// `add_memory`, including any promotion it triggers.
    pub const MEMORY_ADD: &str = "engram::memory::add";
    /// Retrieval queries.
    pub const MEMORY_RETRIEVE: &str = "engram::memory::retrieve";
    /// A single promotion step.
    pub const PROMOTION: &str = "engram::promotion";
    /// Host-side stimulus observation.
    pub const OBSERVATION: &str = "engram::observation";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
