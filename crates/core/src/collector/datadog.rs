//! Statsd collector with DogStatsD circuit tagging
//!
//! Ships per-circuit execution statistics to a statsd backend. Every metric
//! name is fixed (see [`circuitstat_domain::constants`]) and dimensioned by a
//! single `hystrixcircuit:<name>` tag, so one dashboard or monitor covers every
//! circuit as it comes online:
//!
//! ```text
//! max:hystrix.runDuration.95percentile{$region} by {hystrixcircuit}
//! ```
//!
//! ## Delivery
//! - Counters are only sent when non-zero
//! - Both timers are sent for every window
//! - Client errors are dropped; one failed emission never stops the next

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use circuitstat_domain::constants::{
    ALWAYS_SAMPLE, CIRCUIT_TAG_KEY, METRIC_ATTEMPTS, METRIC_CIRCUIT_OPEN, METRIC_ERRORS,
    METRIC_FAILURES, METRIC_FALLBACK_FAILURES, METRIC_FALLBACK_SUCCESSES, METRIC_REJECTS,
    METRIC_RUN_DURATION, METRIC_SHORT_CIRCUITS, METRIC_SUCCESSES, METRIC_TIMEOUTS,
    METRIC_TOTAL_DURATION,
};
use circuitstat_domain::{MetricResult, MetricTag};

use super::{CollectorFactory, MetricCollector};
use crate::metrics_client_ports::MetricsClientPort;

/// Gauge value while the circuit passes traffic
const CIRCUIT_CLOSED: f64 = 0.0;
/// Gauge value while the circuit rejects traffic
const CIRCUIT_OPEN: f64 = 1.0;

/// Collector forwarding one circuit's statistics to a statsd client.
///
/// Holds no mutable state; the client handle and tag list are fixed at
/// construction, so `record` is safe to call from any number of threads.
pub struct DatadogCollector {
    client: Arc<dyn MetricsClientPort>,
    tags: Vec<MetricTag>,
}

impl DatadogCollector {
    /// Create a collector for `circuit_name` emitting through `client`.
    #[must_use]
    pub fn new(client: Arc<dyn MetricsClientPort>, circuit_name: &str) -> Self {
        debug_assert!(!circuit_name.is_empty(), "circuit name must not be empty");
        Self { client, tags: vec![MetricTag::new(CIRCUIT_TAG_KEY, circuit_name)] }
    }

    /// Tags attached to every emission
    #[must_use]
    pub fn tags(&self) -> &[MetricTag] {
        &self.tags
    }

    fn count(&self, name: &str, value: u64) {
        if value == 0 {
            return;
        }
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        let _ = self.client.count(name, value, &self.tags, ALWAYS_SAMPLE);
    }

    fn circuit_open(&self, state: f64) {
        let _ = self.client.gauge(METRIC_CIRCUIT_OPEN, state, &self.tags, ALWAYS_SAMPLE);
    }

    fn timing(&self, name: &str, duration: Duration) {
        let _ = self.client.timing(name, whole_millis(duration), &self.tags, ALWAYS_SAMPLE);
    }
}

impl MetricCollector for DatadogCollector {
    fn record(&self, result: &MetricResult) {
        self.count(METRIC_ATTEMPTS, result.attempts);
        self.count(METRIC_ERRORS, result.errors);
        if result.successes > 0 {
            self.circuit_open(CIRCUIT_CLOSED);
            self.count(METRIC_SUCCESSES, result.successes);
        }
        self.count(METRIC_FAILURES, result.failures);
        self.count(METRIC_REJECTS, result.rejects);
        if result.short_circuits > 0 {
            self.circuit_open(CIRCUIT_OPEN);
            self.count(METRIC_SHORT_CIRCUITS, result.short_circuits);
        }
        self.count(METRIC_TIMEOUTS, result.timeouts);
        self.count(METRIC_FALLBACK_SUCCESSES, result.fallback_successes);
        self.count(METRIC_FALLBACK_FAILURES, result.fallback_failures);

        self.timing(METRIC_TOTAL_DURATION, result.total_duration);
        self.timing(METRIC_RUN_DURATION, result.run_duration);
    }

    /// Nothing is accumulated, so there is nothing to reset.
    fn reset(&self) {}
}

impl fmt::Debug for DatadogCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatadogCollector").field("tags", &self.tags).finish_non_exhaustive()
    }
}

/// Factory producing a [`DatadogCollector`] per circuit, all sharing `client`.
///
/// Register the result with a [`super::CollectorRegistry`].
#[must_use]
pub fn datadog_collector_factory(client: Arc<dyn MetricsClientPort>) -> CollectorFactory {
    Arc::new(move |name: &str| {
        Box::new(DatadogCollector::new(Arc::clone(&client), name)) as Box<dyn MetricCollector>
    })
}

/// Whole milliseconds, sub-millisecond remainder discarded.
#[allow(clippy::cast_precision_loss)]
fn whole_millis(duration: Duration) -> f64 {
    duration.as_millis() as f64
}
