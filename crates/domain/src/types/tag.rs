//! Key/value annotations attached to emitted metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A DogStatsD tag, rendered on the wire as `key:value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricTag {
    key: String,
    value: String,
}

impl MetricTag {
    /// Creates a tag from a key and a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Tag key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Tag value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for MetricTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}
