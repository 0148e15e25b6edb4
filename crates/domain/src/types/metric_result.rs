//! Execution statistics for one reporting window of one circuit.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregated counters and durations produced by the circuit-breaker runtime
/// when an execution window completes.
///
/// Collectors only ever read a `MetricResult`; each field is evaluated on its
/// own and no ordering between fields is implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricResult {
    /// Executions attempted in the window
    pub attempts: u64,
    /// Executions that errored (any kind)
    pub errors: u64,
    /// Executions that completed successfully
    pub successes: u64,
    /// Executions that failed (non-timeout)
    pub failures: u64,
    /// Executions rejected by admission control
    pub rejects: u64,
    /// Executions rejected because the circuit was open
    pub short_circuits: u64,
    /// Executions that exceeded the allowed duration
    pub timeouts: u64,
    /// Fallback paths that succeeded
    pub fallback_successes: u64,
    /// Fallback paths that failed
    pub fallback_failures: u64,
    /// Wall-clock duration including queuing and overhead
    pub total_duration: Duration,
    /// Wall-clock duration of the executed work only
    pub run_duration: Duration,
}

impl MetricResult {
    /// Adds every counter and duration of `other` into `self`, saturating at
    /// the numeric maximum instead of overflowing.
    pub fn accumulate(&mut self, other: &Self) {
        self.attempts = self.attempts.saturating_add(other.attempts);
        self.errors = self.errors.saturating_add(other.errors);
        self.successes = self.successes.saturating_add(other.successes);
        self.failures = self.failures.saturating_add(other.failures);
        self.rejects = self.rejects.saturating_add(other.rejects);
        self.short_circuits = self.short_circuits.saturating_add(other.short_circuits);
        self.timeouts = self.timeouts.saturating_add(other.timeouts);
        self.fallback_successes = self.fallback_successes.saturating_add(other.fallback_successes);
        self.fallback_failures = self.fallback_failures.saturating_add(other.fallback_failures);
        self.total_duration = self.total_duration.saturating_add(other.total_duration);
        self.run_duration = self.run_duration.saturating_add(other.run_duration);
    }

    /// True when no counter recorded any activity. Durations are ignored.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.attempts == 0
            && self.errors == 0
            && self.successes == 0
            && self.failures == 0
            && self.rejects == 0
            && self.short_circuits == 0
            && self.timeouts == 0
            && self.fallback_successes == 0
            && self.fallback_failures == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_sums_fields() {
        let mut total = MetricResult {
            attempts: 2,
            successes: 1,
            failures: 1,
            total_duration: Duration::from_millis(30),
            run_duration: Duration::from_millis(20),
            ..MetricResult::default()
        };
        let window = MetricResult {
            attempts: 3,
            short_circuits: 3,
            total_duration: Duration::from_millis(5),
            ..MetricResult::default()
        };

        total.accumulate(&window);

        assert_eq!(total.attempts, 5);
        assert_eq!(total.successes, 1);
        assert_eq!(total.failures, 1);
        assert_eq!(total.short_circuits, 3);
        assert_eq!(total.total_duration, Duration::from_millis(35));
        assert_eq!(total.run_duration, Duration::from_millis(20));
    }

    #[test]
    fn test_accumulate_saturates() {
        let mut total = MetricResult { attempts: u64::MAX - 1, ..MetricResult::default() };
        total.accumulate(&MetricResult { attempts: 10, ..MetricResult::default() });
        assert_eq!(total.attempts, u64::MAX);
    }

    #[test]
    fn test_is_idle_ignores_durations() {
        let window = MetricResult {
            total_duration: Duration::from_secs(1),
            run_duration: Duration::from_secs(1),
            ..MetricResult::default()
        };
        assert!(window.is_idle());

        let busy = MetricResult { fallback_failures: 1, ..window };
        assert!(!busy.is_idle());
    }

    #[test]
    fn test_deserialize_partial_snapshot() {
        let window: MetricResult = serde_json::from_str(
            r#"{"attempts": 4, "successes": 4, "run_duration": {"secs": 0, "nanos": 1500000}}"#,
        )
        .unwrap();

        assert_eq!(window.attempts, 4);
        assert_eq!(window.successes, 4);
        assert_eq!(window.errors, 0);
        assert_eq!(window.run_duration, Duration::from_micros(1500));
        assert_eq!(window.total_duration, Duration::ZERO);
    }
}
