//! # Engram Core Library
//!
//! Game-agnostic encounter memory for autonomous agents.
//!
//! Every agent owns one [`MemoryController`] holding two tiers:
//!
//! - **Short-term**: a bounded buffer of recent observations, deduplicated
//!   by `(subject, category)` so repeated encounters merge instead of piling up.
//! - **Long-term**: an unbounded store that receives the most significant
//!   short-term entries (largest absolute influence) whenever short-term
//!   capacity is exceeded.
//!
//! Each [`Memory`] carries a cooldown; it becomes *ready* for decision logic
//! once the cooldown has elapsed since its last update. Time is always passed
//! in by the caller as a [`Timestamp`]; the core never reads a clock.
//!
//! ```
//! use engram_core::{EntityId, Memory, MemoryController, Timestamp};
//!
//! let mut controller = MemoryController::new(2)?;
//! let stranger = EntityId::new();
//! let now = Timestamp::from_secs(0.0);
//!
//! controller.add_memory(Memory::new(stranger, "hostility", 5.0, 0.0, now), now)?;
//! controller.add_memory(Memory::new(stranger, "hostility", 5.0, 0.0, now), now)?;
//!
//! let short_term = controller.retrieve_short_term_memories();
//! assert_eq!(short_term.len(), 1);
//! assert!((short_term[0].influence() - 10.0).abs() < f32::EPSILON);
//! # Ok::<(), engram_core::EngramError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod promotion;
pub mod shared;
pub mod store;
pub mod types;

pub use config::{EngramConfig, MemoryConfig};
pub use controller::{AddReport, ControllerStats, MemoryController};
pub use error::{EngramError, Result};
pub use memory::{Memory, MemoryDefinition, MemoryState};
pub use shared::SharedMemoryController;
pub use store::{BoundedStore, MemoryStore, Upsert};
pub use types::*;
