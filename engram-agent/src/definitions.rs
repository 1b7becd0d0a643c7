//! Definition table: which memory a stimulus produces.
//!
//! Designers author one [`MemoryDefinition`] per [`StimulusKind`]:
//!
//! ```toml
//! [attacked]
//! category = "hostility"
//! influence = 10.0
//! cooldown = 5.0
//!
//! [traded_unfairly]
//! category = "trust"
//! influence = -4.0
//! cooldown = 1.0
//! ```
//!
//! Kinds missing from the table produce no memory.

use std::collections::BTreeMap;

use engram_core::error::{EngramError, Result};
use engram_core::memory::MemoryDefinition;

use crate::events::StimulusKind;

/// Stimulus kind → memory definition.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: BTreeMap<StimulusKind, MemoryDefinition>,
}

impl DefinitionTable {
    /// An empty table; every stimulus is ignored.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table used when no definition file is supplied.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(StimulusKind::Attacked, MemoryDefinition::new("hostility", 10.0, 5.0));
        table.insert(StimulusKind::Helped, MemoryDefinition::new("affinity", 5.0, 2.0));
        table.insert(StimulusKind::TradedFairly, MemoryDefinition::new("trust", 2.0, 1.0));
        table.insert(StimulusKind::TradedUnfairly, MemoryDefinition::new("trust", -4.0, 1.0));
        table.insert(StimulusKind::Threatened, MemoryDefinition::new("fear", 6.0, 3.0));
        table.insert(StimulusKind::Sighted, MemoryDefinition::new("familiarity", 0.5, 10.0));
        table
    }

    /// Load and validate a table from a TOML string.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if the TOML is invalid or any
    /// definition is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let sections: BTreeMap<String, MemoryDefinition> =
            toml::from_str(toml_str).map_err(|e| EngramError::Config(e.to_string()))?;

        let mut table = Self::empty();
        for (name, definition) in sections {
            table.insert(name.parse()?, definition);
        }
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check every definition.
    ///
    /// # Errors
    /// Returns `EngramError::Config` naming the first malformed entry.
    pub fn validate(&self) -> Result<()> {
        for (kind, definition) in &self.definitions {
            definition
                .validate()
                .map_err(|e| EngramError::Config(format!("[{kind}]: {e}")))?;
        }
        Ok(())
    }

    /// The definition for `kind`, if authored.
    #[must_use]
    pub fn get(&self, kind: StimulusKind) -> Option<&MemoryDefinition> {
        self.definitions.get(&kind)
    }

    /// Add or replace a definition, returning the previous one.
    pub fn insert(
        &mut self,
        kind: StimulusKind,
        definition: MemoryDefinition,
    ) -> Option<MemoryDefinition> {
        self.definitions.insert(kind, definition)
    }

    /// Number of authored kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing is authored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind() {
        let table = DefinitionTable::builtin();
        assert!(table.validate().is_ok());
        for kind in StimulusKind::ALL {
            assert!(table.get(kind).is_some(), "missing {kind}");
        }
    }

    #[test]
    fn parses_snake_case_sections() {
        let table = DefinitionTable::from_toml(
            "[attacked]\ncategory = \"hostility\"\ninfluence = 8.0\ncooldown = 2.0\n\
             [traded_unfairly]\ncategory = \"trust\"\ninfluence = -3.0\n",
        )
        .expect("parse");

        assert_eq!(table.len(), 2);
        let attacked = table.get(StimulusKind::Attacked).expect("attacked");
        assert_eq!(attacked.category.as_str(), "hostility");
        assert!((attacked.influence - 8.0).abs() < f32::EPSILON);
        assert!(table.get(StimulusKind::Helped).is_none());
    }

    #[test]
    fn unknown_kind_is_a_config_error() {
        let err = DefinitionTable::from_toml("[waved]\ncategory = \"x\"\ninfluence = 1.0\n")
            .expect_err("unknown kind");
        assert!(matches!(err, EngramError::Config(_)));
    }

    #[test]
    fn malformed_definition_is_a_config_error() {
        let err = DefinitionTable::from_toml(
            "[sighted]\ncategory = \"familiarity\"\ninfluence = 1.0\ncooldown = -2.0\n",
        )
        .expect_err("negative cooldown");
        assert!(matches!(err, EngramError::Config(ref msg) if msg.contains("sighted")));
    }

    #[test]
    fn insert_replaces() {
        let mut table = DefinitionTable::empty();
        assert!(table.insert(StimulusKind::Helped, MemoryDefinition::new("a", 1.0, 0.0)).is_none());
        let previous = table.insert(StimulusKind::Helped, MemoryDefinition::new("b", 2.0, 0.0));
        assert_eq!(previous.map(|d| d.category.as_str().to_string()), Some("a".to_string()));
        assert_eq!(table.len(), 1);
    }
}
