//! Error types for the core crate.

use thiserror::Error;

/// Dedup state store errors.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write state file: {0}")]
    Write(#[source] std::io::Error),

    #[error("State file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
