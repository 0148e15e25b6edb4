//! # CircuitStat Domain
//!
//! Domain types for exporting circuit-breaker statistics.
//!
//! This crate contains:
//! - The per-window execution snapshot ([`MetricResult`])
//! - Metric tags and the fixed metric names dashboards depend on
//! - Configuration structures
//! - Error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other CircuitStat crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
