//! Metric names and defaults
//!
//! The metric names are consumed verbatim by existing dashboards and monitors
//! (e.g. `max:hystrix.runDuration.95percentile{$region} by {hystrixcircuit}`),
//! so they must not change.

// Circuit gauge (0 = passing traffic, 1 = short-circuiting)
pub const METRIC_CIRCUIT_OPEN: &str = "hystrix.circuitOpen";

// Execution counters
pub const METRIC_ATTEMPTS: &str = "hystrix.attempts";
pub const METRIC_ERRORS: &str = "hystrix.errors";
pub const METRIC_SUCCESSES: &str = "hystrix.successes";
pub const METRIC_FAILURES: &str = "hystrix.failures";
pub const METRIC_REJECTS: &str = "hystrix.rejects";
pub const METRIC_SHORT_CIRCUITS: &str = "hystrix.shortCircuits";
pub const METRIC_TIMEOUTS: &str = "hystrix.timeouts";
pub const METRIC_FALLBACK_SUCCESSES: &str = "hystrix.fallbackSuccesses";
pub const METRIC_FALLBACK_FAILURES: &str = "hystrix.fallbackFailures";

// Timers (milliseconds)
pub const METRIC_TOTAL_DURATION: &str = "hystrix.totalDuration";
pub const METRIC_RUN_DURATION: &str = "hystrix.runDuration";

/// Tag key carrying the circuit name on every emission
pub const CIRCUIT_TAG_KEY: &str = "hystrixcircuit";

/// Every collector emission is always sampled
pub const ALWAYS_SAMPLE: f64 = 1.0;

/// Default DogStatsD agent address
pub const DEFAULT_STATSD_ADDR: &str = "127.0.0.1:8125";

/// Default tracing filter when neither config nor `RUST_LOG` provide one
pub const DEFAULT_LOG_FILTER: &str = "info";
