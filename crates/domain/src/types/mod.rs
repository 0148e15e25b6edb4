//! Domain types and models

pub mod metric_result;
pub mod tag;

pub use metric_result::MetricResult;
pub use tag::MetricTag;
