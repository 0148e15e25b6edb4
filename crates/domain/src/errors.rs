//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CircuitStat
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CircuitStatError {
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Address resolution or socket setup failed while building a client.
    #[error("Network error: {0}")]
    Network(String),

    /// A single metric emission could not be delivered.
    #[error("Emission error: {0}")]
    Emission(String),

    /// Caller supplied an unusable value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for CircuitStat operations
pub type Result<T> = std::result::Result<T, CircuitStatError>;
