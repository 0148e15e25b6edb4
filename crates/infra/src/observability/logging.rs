//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter so operators can
//! turn up verbosity without editing config files.

use circuitstat_domain::{CircuitStatError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns `CircuitStatError::Config` if the filter directive is invalid or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    installed.map_err(|e| CircuitStatError::Config(format!("Failed to install tracing: {e}")))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| {
        CircuitStatError::Config(format!("Invalid log filter '{}': {e}", config.filter))
    })
}
