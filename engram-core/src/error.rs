//! Error types for the Engram core library.

use thiserror::Error;

/// Top-level error type for all Engram operations.
#[derive(Error, Debug)]
pub enum EngramError {
    /// Construction-time configuration is unusable (e.g. zero capacity).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller handed in a malformed value; nothing was mutated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EngramError>;
