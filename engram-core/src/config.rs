//! Configuration for the Engram memory system.
//!
//! Maps directly to `engram.toml`:
//!
//! ```toml
//! [general]
//! enabled = true
//! log_level = "info"
//!
//! [memory]
//! short_term_capacity = 10
//!
//! [telemetry]
//! enabled = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngramError, Result};

/// Top-level Engram configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngramConfig {
    /// `[general]` section.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Per-agent memory policy.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Counter export and log format.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl EngramConfig {
    /// Load and validate configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if the TOML is invalid or a value is
    /// out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| EngramError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check every section.
    ///
    /// # Errors
    /// Returns `EngramError::Config` naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.memory.validate()
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Process-wide switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// When off, agents are created inactive and learn nothing.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Per-agent memory policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Entries held in short-term memory before promotion kicks in. Must be ≥ 1.
    #[serde(default = "default_short_term_capacity")]
    pub short_term_capacity: usize,
}

impl MemoryConfig {
    /// Check the policy values.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if `short_term_capacity` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.short_term_capacity == 0 {
            return Err(EngramError::Config(
                "memory.short_term_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 10,
        }
    }
}

/// Counter export and log format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Opt-in only. When set, agents built from this config report into one
    /// counter set shared by the host.
    #[serde(default)]
    pub enabled: bool,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json_logs: bool,
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_short_term_capacity() -> usize { 10 }
