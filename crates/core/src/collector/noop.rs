//! Collector that discards everything.

use circuitstat_domain::MetricResult;

use super::MetricCollector;

/// Collector for circuits that should not report anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollector;

impl MetricCollector for NoopCollector {
    fn record(&self, _result: &MetricResult) {}

    fn reset(&self) {}
}
