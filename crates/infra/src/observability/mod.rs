//! Observability: tracing setup and sync cycle metrics
//!
//! Metrics are plain atomic counters updated by the scheduler after every
//! cycle. They are read through [`metrics::SyncMetrics::snapshot`].

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
pub use metrics::{SyncMetrics, SyncMetricsSnapshot};
