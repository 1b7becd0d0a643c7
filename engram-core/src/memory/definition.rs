//! Memory definitions: authored templates for candidate memories.
//!
//! A definition says what a memory *should* look like the first time it is
//! observed. It is never stored or mutated; [`MemoryDefinition::instantiate`]
//! copies its values into a fresh [`Memory`] for a concrete subject.

use serde::{Deserialize, Serialize};

use super::Memory;
use crate::error::{EngramError, Result};
use crate::types::{EntityId, MemoryCategory, Timestamp};

/// Immutable template for a candidate memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDefinition {
    /// Category given to every memory built from this definition.
    pub category: MemoryCategory,
    /// Initial influence of a fresh memory.
    pub influence: f32,
    /// Cooldown in seconds.
    #[serde(default)]
    pub cooldown: f64,
}

impl MemoryDefinition {
    /// Create a definition.
    #[must_use]
    pub fn new(category: impl Into<MemoryCategory>, influence: f32, cooldown_secs: f64) -> Self {
        Self {
            category: category.into(),
            influence,
            cooldown: cooldown_secs,
        }
    }

    /// Check the authored values.
    ///
    /// # Errors
    ///
    /// Returns [`EngramError::InvalidArgument`] if the category is blank, the
    /// influence is not finite, or the cooldown is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.category.is_blank() {
            return Err(EngramError::InvalidArgument(
                "definition has a blank category".to_string(),
            ));
        }
        if !self.influence.is_finite() {
            return Err(EngramError::InvalidArgument(format!(
                "definition '{}' has non-finite influence {}",
                self.category, self.influence
            )));
        }
        if !self.cooldown.is_finite() || self.cooldown < 0.0 {
            return Err(EngramError::InvalidArgument(format!(
                "definition '{}' has invalid cooldown {}",
                self.category, self.cooldown
            )));
        }
        Ok(())
    }

    /// Build a candidate memory about `subject`, stamped at `now`.
    #[must_use]
    pub fn instantiate(&self, subject: EntityId, now: Timestamp) -> Memory {
        Memory::new(subject, self.category.clone(), self.influence, self.cooldown, now)
    }
}
