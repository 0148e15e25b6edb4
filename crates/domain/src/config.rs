//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_STATSD_ADDR};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metrics backend settings
    pub statsd: StatsdConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// DogStatsD client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsdConfig {
    /// Agent address in `<host>:<port>` form
    pub address: String,
    /// Namespace prepended verbatim to every metric name (may be empty)
    pub prefix: String,
    /// Tags (`key:value`) attached to every metric sent by the client
    pub global_tags: Vec<String>,
    /// Add `env`/`service`/`version` tags from `DD_ENV`, `DD_SERVICE`, `DD_VERSION`
    pub inherit_env_tags: bool,
}

impl Default for StatsdConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_STATSD_ADDR.to_string(),
            prefix: String::new(),
            global_tags: Vec::new(),
            inherit_env_tags: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), json: false }
    }
}
