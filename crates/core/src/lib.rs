//! # CircuitStat Core
//!
//! Collector logic with no infrastructure dependencies.
//!
//! This crate contains:
//! - The metrics-client port the statsd backend is reached through
//! - The collector contract handed to the circuit-breaker runtime
//! - Collector variants (Datadog/statsd, in-memory, no-op)
//! - The registry that builds one collector set per circuit
//!
//! ## Architecture Principles
//! - Only depends on `circuitstat-domain`
//! - No sockets or file I/O
//! - The backend client is injected through [`MetricsClientPort`]

pub mod collector;
pub mod metrics_client_ports;

pub use collector::{
    datadog_collector_factory, CollectorFactory, CollectorRegistry, CollectorSet,
    DatadogCollector, InMemoryCollector, MetricCollector, NoopCollector,
};
pub use metrics_client_ports::MetricsClientPort;
