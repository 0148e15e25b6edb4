//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CIRCUITSTAT_STATSD_ADDR` is absent, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CIRCUITSTAT_STATSD_ADDR`: DogStatsD agent address (required)
//! - `CIRCUITSTAT_STATSD_PREFIX`: Namespace prepended to metric names
//! - `CIRCUITSTAT_STATSD_TAGS`: Comma-separated `key:value` client tags
//! - `CIRCUITSTAT_STATSD_ENV_TAGS`: Inherit `DD_ENV`/`DD_SERVICE`/`DD_VERSION`
//!   tags (true/false)
//! - `CIRCUITSTAT_LOG_FILTER`: Tracing filter directive
//! - `CIRCUITSTAT_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` or `./circuitstat.{json,toml}`
//! 2. The same names one and two directories up
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use circuitstat_domain::{CircuitStatError, Config, LoggingConfig, Result, StatsdConfig};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "circuitstat.json", "circuitstat.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or invalid, falls back to loading from a config file.
///
/// # Errors
/// Returns `CircuitStatError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CIRCUITSTAT_STATSD_ADDR` must be set; every other variable falls back to
/// its default.
///
/// # Errors
/// Returns `CircuitStatError::Config` if the agent address is missing or
/// empty.
pub fn load_from_env() -> Result<Config> {
    let address = env_var("CIRCUITSTAT_STATSD_ADDR")?;
    if address.trim().is_empty() {
        return Err(CircuitStatError::Config("CIRCUITSTAT_STATSD_ADDR is empty".to_string()));
    }

    let statsd_defaults = StatsdConfig::default();
    let logging_defaults = LoggingConfig::default();

    let prefix = std::env::var("CIRCUITSTAT_STATSD_PREFIX").unwrap_or(statsd_defaults.prefix);
    let global_tags = std::env::var("CIRCUITSTAT_STATSD_TAGS")
        .map(|raw| parse_tag_list(&raw))
        .unwrap_or(statsd_defaults.global_tags);
    let inherit_env_tags =
        env_bool("CIRCUITSTAT_STATSD_ENV_TAGS", statsd_defaults.inherit_env_tags);

    let filter = std::env::var("CIRCUITSTAT_LOG_FILTER").unwrap_or(logging_defaults.filter);
    let json = env_bool("CIRCUITSTAT_LOG_JSON", logging_defaults.json);

    Ok(Config {
        statsd: StatsdConfig { address, prefix, global_tags, inherit_env_tags },
        logging: LoggingConfig { filter, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `CircuitStatError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CircuitStatError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CircuitStatError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CircuitStatError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CircuitStatError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CircuitStatError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CircuitStatError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the same
/// locations relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Split `a:b, c:d` into trimmed, non-empty tags
fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_string).collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `CircuitStatError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CircuitStatError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
