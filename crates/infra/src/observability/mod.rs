//! Observability infrastructure: statsd transport and logging
//!
//! ## Design Principles
//!
//! 1. **Best-effort delivery**: metrics travel over UDP; a lost datagram is
//!    never retried and never surfaces to the code being measured.
//!
//! 2. **Errors at the edge**: [`MetricsError`] stays inside this crate and is
//!    converted to [`CircuitStatError`] where it crosses the
//!    `MetricsClientPort` boundary. Collectors discard it.
//!
//! 3. **Quiet hot path**: nothing above `debug` is logged per emission.

pub mod exporters;
pub mod logging;

use std::io;

use circuitstat_domain::CircuitStatError;

/// Metrics transport error type
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// No agent address configured
    #[error("Statsd address is empty")]
    MissingAddress,

    /// Agent address could not be parsed or resolved
    #[error("Invalid statsd address '{address}': {reason}")]
    InvalidAddress {
        /// Address as configured
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// Local UDP socket could not be created
    #[error("Socket setup failed: {source}")]
    SocketSetup {
        /// Underlying IO error
        source: io::Error,
    },

    /// Network send failed (DogStatsD UDP)
    #[error("Network send failed: {source}")]
    SendFailed {
        /// Underlying IO error
        #[from]
        source: io::Error,
    },
}

/// Result type for metrics transport operations
pub type MetricsResult<T> = Result<T, MetricsError>;

impl From<MetricsError> for CircuitStatError {
    fn from(err: MetricsError) -> Self {
        match err {
            MetricsError::MissingAddress => Self::InvalidInput(err.to_string()),
            MetricsError::InvalidAddress { .. } | MetricsError::SocketSetup { .. } => {
                Self::Network(err.to_string())
            }
            MetricsError::SendFailed { .. } => Self::Emission(err.to_string()),
        }
    }
}
