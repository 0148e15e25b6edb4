//! Shared test helpers for `circuitstat-core` integration tests.
//!
//! `RecordingClient` stands in for a statsd client: it captures every call the
//! collectors make and can be told to fail, so tests assert on emitted
//! `(kind, name, value, tags, rate)` tuples instead of wire bytes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use circuitstat_core::MetricsClientPort;
use circuitstat_domain::{CircuitStatError, MetricTag, Result};
use parking_lot::Mutex;

/// Which client method an emission went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionKind {
    Count,
    Gauge,
    Timing,
}

/// One captured client call
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub kind: EmissionKind,
    pub name: String,
    pub value: f64,
    pub tags: Vec<MetricTag>,
    pub sample_rate: f64,
}

/// Client double recording every call, optionally failing some of them.
#[derive(Debug, Default)]
pub struct RecordingClient {
    emissions: Mutex<Vec<Emission>>,
    fail_first: AtomicUsize,
    failures: AtomicUsize,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an error from the first `calls` calls (they are still captured)
    pub fn failing_first(calls: usize) -> Self {
        Self { fail_first: AtomicUsize::new(calls), ..Self::default() }
    }

    /// Fail every call
    pub fn failing() -> Self {
        Self::failing_first(usize::MAX)
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().clone()
    }

    pub fn of_kind(&self, kind: EmissionKind) -> Vec<Emission> {
        self.emissions().into_iter().filter(|e| e.kind == kind).collect()
    }

    pub fn named(&self, name: &str) -> Vec<Emission> {
        self.emissions().into_iter().filter(|e| e.name == name).collect()
    }

    /// Names in emission order
    pub fn names(&self) -> Vec<String> {
        self.emissions().into_iter().map(|e| e.name).collect()
    }

    /// Number of calls that returned an error
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    fn capture(
        &self,
        kind: EmissionKind,
        name: &str,
        value: f64,
        tags: &[MetricTag],
        sample_rate: f64,
    ) -> Result<()> {
        self.emissions.lock().push(Emission {
            kind,
            name: name.to_string(),
            value,
            tags: tags.to_vec(),
            sample_rate,
        });

        let should_fail = self
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(CircuitStatError::Emission(format!("injected failure for {name}")));
        }
        Ok(())
    }
}

impl MetricsClientPort for RecordingClient {
    fn count(&self, name: &str, value: i64, tags: &[MetricTag], sample_rate: f64) -> Result<()> {
        #[allow(clippy::cast_precision_loss)]
        let value = value as f64;
        self.capture(EmissionKind::Count, name, value, tags, sample_rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[MetricTag], sample_rate: f64) -> Result<()> {
        self.capture(EmissionKind::Gauge, name, value, tags, sample_rate)
    }

    fn timing(
        &self,
        name: &str,
        value_ms: f64,
        tags: &[MetricTag],
        sample_rate: f64,
    ) -> Result<()> {
        self.capture(EmissionKind::Timing, name, value_ms, tags, sample_rate)
    }
}
