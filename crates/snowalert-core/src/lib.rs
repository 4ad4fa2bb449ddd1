//! Core pieces for snowalert: configuration, error types and the
//! dedup state store shared by the binary.

pub mod config;
pub mod error;
pub mod state;

pub use config::{Config, LocationConfig, PushoverConfig, ValidationResult};
pub use error::StateError;
pub use state::{JsonStateStore, MemoryStateStore, StateStore, LAST_MESSAGE_SENT_KEY};

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!("snowalert core initialized");
    Ok(())
}
