//! # CircuitStat Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The DogStatsD UDP client implementing `MetricsClientPort`
//! - The default Datadog collector factory
//! - Configuration loading (environment, TOML, JSON)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `circuitstat-core`
//! - Contains all "impure" code (sockets, files, environment)

pub mod config;
pub mod observability;

// Re-export commonly used items
pub use observability::exporters::{new_datadog_collector, DatadogClient, DEFAULT_DATADOG_ADDR};
pub use observability::{MetricsError, MetricsResult};
