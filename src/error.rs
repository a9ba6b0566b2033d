//! Errors surfaced by the configuration layer
//!
//! The simulation itself never fails: broken invariants inside the core are
//! programming errors and assert instead.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::GameConfig`].
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
