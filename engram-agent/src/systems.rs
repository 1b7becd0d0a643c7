//! Per-tick systems for agent memory.
//!
//! The host calls [`observe_stimulus`] for every stimulus an agent perceives
//! and [`disposition_toward`] when a behavior needs to know how the agent
//! currently feels about someone.

use std::collections::BTreeMap;

use engram_core::error::Result;
use engram_core::metrics::spans;
use engram_core::types::{EntityId, MemoryCategory, Timestamp};
use engram_core::{AddReport, Memory, MemoryController};
use tracing::{debug_span, trace};

use crate::components::MemoryComponent;
use crate::definitions::DefinitionTable;
use crate::events::Stimulus;

/// Turn a stimulus into a memory for the perceiving agent.
///
/// Returns `Ok(None)` when the agent is inactive or the table has no
/// definition for the stimulus kind.
///
/// # Errors
/// Returns `EngramError::InvalidArgument` if the stimulus names a nil
/// subject or the definition is malformed; the component is left untouched.
pub fn observe_stimulus(
    component: &mut MemoryComponent,
    stimulus: &Stimulus,
    table: &DefinitionTable,
) -> Result<Option<AddReport>> {
    let kind = stimulus.kind();
    if !component.active {
        trace!(%kind, "agent inactive, stimulus ignored");
        return Ok(None);
    }
    let Some(definition) = table.get(kind) else {
        trace!(%kind, "no definition, stimulus ignored");
        return Ok(None);
    };

    let subject = stimulus.subject();
    let timestamp = stimulus.timestamp();
    let _span = debug_span!(spans::OBSERVATION, %kind, subject = %subject).entered();

    let candidate = definition.instantiate(subject, timestamp);
    component.controller.add_memory(candidate, timestamp).map(Some)
}

/// How an agent feels about one subject right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Disposition {
    /// Summed influence of ready memories, per category.
    pub by_category: BTreeMap<MemoryCategory, f32>,
    /// Sum over every category.
    pub total: f32,
}

impl Disposition {
    /// Summed influence for `category`, zero if nothing is ready.
    #[must_use]
    pub fn influence(&self, category: &MemoryCategory) -> f32 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }

    /// Whether no ready memory contributed.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Sum the ready memories about `subject` in both stores.
///
/// Memories still cooling down are left out, so a burst of stimuli only
/// affects behavior once it has settled.
#[must_use]
pub fn disposition_toward(
    controller: &MemoryController,
    subject: EntityId,
    now: Timestamp,
) -> Disposition {
    let mut disposition = Disposition::default();
    for memory in controller.ready_memories_about(subject, now) {
        *disposition
            .by_category
            .entry(memory.category().clone())
            .or_insert(0.0) += memory.influence();
        disposition.total += memory.influence();
    }
    disposition
}

/// Ready memories about `subject`, strongest first.
#[must_use]
pub fn strongest_memories_about(
    controller: &MemoryController,
    subject: EntityId,
    now: Timestamp,
) -> Vec<&Memory> {
    let mut ready = controller.ready_memories_about(subject, now);
    ready.sort_by(|a, b| b.influence().abs().total_cmp(&a.influence().abs()));
    ready
}
