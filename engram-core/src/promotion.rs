//! Short-term → long-term promotion policy.
//!
//! When the short-term store grows past its capacity, the controller moves
//! one entry at a time into long-term memory until it fits again. The entry
//! moved is the most behaviorally significant one:
//!
//! ```text
//! priority = ( |influence| ,  oldest last_updated ,  earliest position )
//!              ─ highest ─     ─ breaks ties ─        ─ breaks ties ─
//! ```
//!
//! Low-magnitude entries stay behind in short-term, where later merges can
//! still change them.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::memory::Memory;
use crate::types::{MemoryKey, Timestamp};

/// Sort key for promotion; the maximum is promoted first.
pub type PromotionPriority = (OrderedFloat<f32>, Reverse<Timestamp>);

/// Promotion priority of a single memory, ignoring its position.
#[must_use]
pub fn promotion_priority(memory: &Memory) -> PromotionPriority {
    (
        OrderedFloat(memory.influence().abs()),
        Reverse(memory.last_updated()),
    )
}

/// Position of the entry to promote next, or `None` for an empty slice.
#[must_use]
pub fn select_victim_index(entries: &[Memory]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .max_by_key(|&(pos, memory)| (promotion_priority(memory), Reverse(pos)))
        .map(|(pos, _)| pos)
}

/// Merge key of the entry to promote next, or `None` for an empty slice.
#[must_use]
pub fn select_victim(entries: &[Memory]) -> Option<MemoryKey> {
    select_victim_index(entries).map(|pos| entries[pos].key())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
