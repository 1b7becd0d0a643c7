//! Per-agent memory component.
//!
//! One [`MemoryComponent`] is attached to every agent that can remember.
//! It owns the agent's [`MemoryController`]; nothing is shared between
//! agents.

use std::sync::Arc;

use engram_core::config::{EngramConfig, MemoryConfig};
use engram_core::error::Result;
use engram_core::metrics::MemoryCounters;
use engram_core::{ControllerStats, MemoryController};

/// The memory an agent carries around.
#[derive(Debug)]
pub struct MemoryComponent {
    /// The agent's short-term and long-term stores.
    pub controller: MemoryController,
    /// Whether observation runs for this agent. Inactive agents keep what
    /// they remember but learn nothing new.
    pub active: bool,
}

impl MemoryComponent {
    /// Create an active component sized from `config`.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if the short-term capacity is zero.
    pub fn new(config: &MemoryConfig) -> Result<Self> {
        Ok(Self::with_controller(MemoryController::from_config(config)?))
    }

    /// Create a component from the whole `engram.toml`. The component starts
    /// inactive when `general.enabled` is off. With `telemetry.enabled` set,
    /// its controller reports into the host's shared `counters`; otherwise it
    /// keeps a private set.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if the memory section is invalid.
    pub fn from_config(config: &EngramConfig, counters: &Arc<MemoryCounters>) -> Result<Self> {
        let mut controller = MemoryController::from_config(&config.memory)?;
        if config.telemetry.enabled {
            controller = controller.with_counters(Arc::clone(counters));
        }
        let mut component = Self::with_controller(controller);
        component.active = config.general.enabled;
        Ok(component)
    }

    /// Wrap an existing controller.
    #[must_use]
    pub fn with_controller(controller: MemoryController) -> Self {
        Self {
            controller,
            active: true,
        }
    }

    /// Store sizes.
    #[must_use]
    pub fn stats(&self) -> ControllerStats {
        self.controller.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engram_core::{EntityId, Memory, Timestamp};

    #[test]
    fn new_component_is_active_and_empty() {
        let component = MemoryComponent::new(&MemoryConfig::default()).expect("component");
        assert!(component.active);

        let stats = component.stats();
        assert_eq!(stats.short_term_len, 0);
        assert_eq!(stats.long_term_len, 0);
        assert_eq!(stats.short_term_capacity, 10);
    }

    #[test]
    fn disabled_config_gives_inactive_component() {
        let config = EngramConfig::from_toml("[general]\nenabled = false\n").expect("config");
        let counters = Arc::new(MemoryCounters::new());
        let component = MemoryComponent::from_config(&config, &counters).expect("component");
        assert!(!component.active);
    }

    #[test]
    fn telemetry_enabled_attaches_shared_counters() {
        let config = EngramConfig::from_toml("[telemetry]\nenabled = true\n").expect("config");
        let counters = Arc::new(MemoryCounters::new());
        let mut a = MemoryComponent::from_config(&config, &counters).expect("a");
        let mut b = MemoryComponent::from_config(&config, &counters).expect("b");

        let now = Timestamp::ZERO;
        for component in [&mut a, &mut b] {
            component
                .controller
                .add_memory(Memory::new(EntityId::new(), "trust", 1.0, 0.0, now), now)
                .expect("add");
        }
        assert!(Arc::ptr_eq(a.controller.counters(), &counters));
        assert_eq!(counters.snapshot().candidates_added, 2);
    }

    #[test]
    fn telemetry_disabled_keeps_counters_private() {
        let config = EngramConfig::default();
        let counters = Arc::new(MemoryCounters::new());
        let mut component = MemoryComponent::from_config(&config, &counters).expect("component");

        let now = Timestamp::ZERO;
        component
            .controller
            .add_memory(Memory::new(EntityId::new(), "trust", 1.0, 0.0, now), now)
            .expect("add");
        assert!(!Arc::ptr_eq(component.controller.counters(), &counters));
        assert_eq!(counters.snapshot().candidates_added, 0);
        assert_eq!(component.controller.counters().snapshot().candidates_added, 1);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = MemoryConfig {
            short_term_capacity: 0,
        };
        assert!(MemoryComponent::new(&config).is_err());
    }
}
