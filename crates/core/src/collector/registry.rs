//! Collector registry
//!
//! Holds the factories the circuit-breaker runtime calls when a circuit is
//! created. Each registered factory contributes one collector to the
//! circuit's [`CollectorSet`].

use std::fmt;

use parking_lot::RwLock;

use super::{CollectorFactory, CollectorSet};

/// Thread-safe list of collector factories.
#[derive(Default)]
pub struct CollectorRegistry {
    factories: RwLock<Vec<CollectorFactory>>,
}

impl CollectorRegistry {
    /// Create a registry with no factories
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory; it is used for every circuit initialized afterwards.
    pub fn register(&self, factory: CollectorFactory) {
        self.factories.write().push(factory);
    }

    /// Build the collectors for `circuit_name`, one per factory, in
    /// registration order.
    #[must_use]
    pub fn initialize(&self, circuit_name: &str) -> CollectorSet {
        // Factories run outside the lock so they may touch the registry.
        let factories = self.factories.read().clone();
        let mut set = CollectorSet::new(circuit_name);
        for factory in &factories {
            set.push(factory(circuit_name));
        }
        set
    }

    /// Remove every factory
    pub fn clear(&self) {
        self.factories.write().clear();
    }

    /// Number of registered factories
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// True when no factory is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl fmt::Debug for CollectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorRegistry").field("factories", &self.len()).finish()
    }
}
