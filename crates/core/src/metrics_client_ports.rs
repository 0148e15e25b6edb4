//! Metrics client port - the statsd-style backend collectors emit through
//!
//! Implementations must be safe for concurrent use: collectors for many
//! circuits call into one shared client from whichever thread completed an
//! execution window.

use circuitstat_domain::{MetricTag, Result};

/// Minimum client surface needed by [`crate::DatadogCollector`].
///
/// Implement this to plug in your own transport, add per-metric tags, or log
/// delivery failures. Collectors discard every error returned here.
pub trait MetricsClientPort: Send + Sync {
    /// Increment the named counter by `value`.
    fn count(&self, name: &str, value: i64, tags: &[MetricTag], sample_rate: f64) -> Result<()>;

    /// Set the named gauge to `value`.
    fn gauge(&self, name: &str, value: f64, tags: &[MetricTag], sample_rate: f64) -> Result<()>;

    /// Record a duration in milliseconds under the named timer.
    fn timing(&self, name: &str, value_ms: f64, tags: &[MetricTag], sample_rate: f64)
        -> Result<()>;
}
