//! Metric collectors
//!
//! The circuit-breaker runtime hands every completed execution window to each
//! collector registered for the circuit. Collectors are built per circuit from
//! a [`CollectorFactory`] and must tolerate concurrent `record` calls.

pub mod datadog;
pub mod in_memory;
pub mod noop;
pub mod registry;

use std::fmt::Debug;
use std::sync::Arc;

use circuitstat_domain::MetricResult;

pub use datadog::{datadog_collector_factory, DatadogCollector};
pub use in_memory::InMemoryCollector;
pub use noop::NoopCollector;
pub use registry::CollectorRegistry;

/// Pluggable collector contract expected by the circuit-breaker runtime.
pub trait MetricCollector: Send + Sync + Debug {
    /// Consume the statistics of one completed execution window.
    fn record(&self, result: &MetricResult);

    /// Discard any state accumulated so far.
    fn reset(&self);
}

impl<T: MetricCollector + ?Sized> MetricCollector for Arc<T> {
    fn record(&self, result: &MetricResult) {
        (**self).record(result);
    }

    fn reset(&self) {
        (**self).reset();
    }
}

/// Builds the collector for a named circuit.
pub type CollectorFactory = Arc<dyn Fn(&str) -> Box<dyn MetricCollector> + Send + Sync>;

/// All collectors attached to one circuit.
///
/// Fans every call out to its members in the order they were added.
#[derive(Debug, Default)]
pub struct CollectorSet {
    circuit: String,
    collectors: Vec<Box<dyn MetricCollector>>,
}

impl CollectorSet {
    /// Create an empty set for `circuit`
    #[must_use]
    pub fn new(circuit: impl Into<String>) -> Self {
        Self { circuit: circuit.into(), collectors: Vec::new() }
    }

    /// Append a collector
    pub fn push(&mut self, collector: Box<dyn MetricCollector>) {
        self.collectors.push(collector);
    }

    /// Circuit this set was built for
    #[must_use]
    pub fn circuit(&self) -> &str {
        &self.circuit
    }

    /// Number of collectors in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    /// True when no collector is attached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }
}

impl MetricCollector for CollectorSet {
    fn record(&self, result: &MetricResult) {
        for collector in &self.collectors {
            collector.record(result);
        }
    }

    fn reset(&self) {
        for collector in &self.collectors {
            collector.reset();
        }
    }
}
