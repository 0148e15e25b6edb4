//! In-process collector
//!
//! Keeps running totals of every window it receives. Useful for health
//! endpoints, local debugging, and assertions in tests of code that drives
//! the collector contract.

use parking_lot::Mutex;

use circuitstat_domain::MetricResult;

use super::MetricCollector;

#[derive(Debug, Default)]
struct Totals {
    result: MetricResult,
    windows: u64,
}

/// Accumulates recorded windows until [`MetricCollector::reset`] is called.
#[derive(Debug, Default)]
pub struct InMemoryCollector {
    totals: Mutex<Totals>,
}

impl InMemoryCollector {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Field-wise sum of every window recorded since the last reset
    #[must_use]
    pub fn totals(&self) -> MetricResult {
        self.totals.lock().result
    }

    /// Number of windows recorded since the last reset
    #[must_use]
    pub fn windows(&self) -> u64 {
        self.totals.lock().windows
    }
}

impl MetricCollector for InMemoryCollector {
    fn record(&self, result: &MetricResult) {
        let mut totals = self.totals.lock();
        totals.result.accumulate(result);
        totals.windows = totals.windows.saturating_add(1);
    }

    fn reset(&self) {
        *self.totals.lock() = Totals::default();
    }
}
