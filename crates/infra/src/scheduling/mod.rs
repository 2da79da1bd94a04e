//! Scheduling infrastructure for periodic sync cycles
//!
//! The scheduler follows the runtime rules used throughout this crate:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on all async operations

pub mod error;
pub mod status_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use status_scheduler::{CycleOutcome, StatusSyncScheduler, SyncJob};
