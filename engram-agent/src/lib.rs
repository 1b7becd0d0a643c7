//! # engram-agent: Agent Integration for Engram
//!
//! This crate sits between a host's per-tick agent update and the
//! game-agnostic `engram-core` library.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Host agent update              │
//! │  ┌───────────────────────────────────┐  │
//! │  │        engram-agent               │  │
//! │  │  ┌──────────┐  ┌──────────────┐   │  │
//! │  │  │ Stimulus │─▶│ Definitions  │   │  │
//! │  │  └──────────┘  └──────┬───────┘   │  │
//! │  │                       ▼           │  │
//! │  │  ┌──────────┐  ┌──────────────┐   │  │
//! │  │  │ Systems  │─▶│  Component   │   │  │
//! │  │  └──────────┘  └──────┬───────┘   │  │
//! │  │                       ▼           │  │
//! │  │         ┌─────────────────────┐   │  │
//! │  │         │     engram-core     │   │  │
//! │  │         └─────────────────────┘   │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events`: stimuli the host raises when an agent perceives something
//! - `definitions`: stimulus kind → memory definition table
//! - `components`: per-agent memory component
//! - `systems`: observation and disposition passes
//! - `logging`: `tracing-subscriber` setup from `engram.toml`

pub mod components;
pub mod definitions;
pub mod events;
pub mod logging;
pub mod systems;
