//! Stimuli that can produce memories.
//!
//! The host raises one [`Stimulus`] per perception, from the perceiving
//! agent's point of view. Each names the entity the resulting memory would be
//! about and the moment it happened.

use std::fmt;
use std::str::FromStr;

use engram_core::error::EngramError;
use engram_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Something an agent perceived about another entity.
#[derive(Debug, Clone)]
pub enum Stimulus {
    /// The agent was attacked.
    Attacked {
        attacker: EntityId,
        timestamp: Timestamp,
    },

    /// The agent was helped (healed, defended, rescued).
    Helped {
        helper: EntityId,
        timestamp: Timestamp,
    },

    /// The agent traded with someone.
    Traded {
        partner: EntityId,
        perceived_fairness: f32, // -1.0 (rip-off) to 1.0 (generous)
        timestamp: Timestamp,
    },

    /// Someone threatened the agent without attacking.
    Threatened {
        threat: EntityId,
        timestamp: Timestamp,
    },

    /// The agent noticed an entity nearby.
    Sighted {
        entity: EntityId,
        timestamp: Timestamp,
    },
}

/// Lookup key into a definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    Attacked,
    Helped,
    TradedFairly,
    TradedUnfairly,
    Threatened,
    Sighted,
}

impl StimulusKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Attacked,
        Self::Helped,
        Self::TradedFairly,
        Self::TradedUnfairly,
        Self::Threatened,
        Self::Sighted,
    ];

    /// The snake_case name used in definition files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attacked => "attacked",
            Self::Helped => "helped",
            Self::TradedFairly => "traded_fairly",
            Self::TradedUnfairly => "traded_unfairly",
            Self::Threatened => "threatened",
            Self::Sighted => "sighted",
        }
    }
}

impl fmt::Display for StimulusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StimulusKind {
    type Err = EngramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngramError::Config(format!("unknown stimulus kind '{s}'")))
    }
}

impl Stimulus {
    /// The entity a memory of this stimulus is about.
    #[must_use]
    pub fn subject(&self) -> EntityId {
        match self {
            Self::Attacked { attacker: subject, .. }
            | Self::Helped { helper: subject, .. }
            | Self::Traded { partner: subject, .. }
            | Self::Threatened { threat: subject, .. }
            | Self::Sighted { entity: subject, .. } => *subject,
        }
    }

    /// When the stimulus happened.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Attacked { timestamp, .. }
            | Self::Helped { timestamp, .. }
            | Self::Traded { timestamp, .. }
            | Self::Threatened { timestamp, .. }
            | Self::Sighted { timestamp, .. } => *timestamp,
        }
    }

    /// Which definition applies. A trade counts as fair unless the agent felt
    /// cheated.
    #[must_use]
    pub fn kind(&self) -> StimulusKind {
        match self {
            Self::Attacked { .. } => StimulusKind::Attacked,
            Self::Helped { .. } => StimulusKind::Helped,
            Self::Traded {
                perceived_fairness, ..
            } => {
                if *perceived_fairness < 0.0 {
                    StimulusKind::TradedUnfairly
                } else {
                    StimulusKind::TradedFairly
                }
            }
            Self::Threatened { .. } => StimulusKind::Threatened,
            Self::Sighted { .. } => StimulusKind::Sighted,
        }
    }
}
