//! # StatusSync Infrastructure
//!
//! Runtime plumbing around the core sync engine.
//!
//! This crate contains:
//! - Configuration loading (environment and TOML/JSON files)
//! - Tracing subscriber setup and sync metrics
//! - The cron scheduler that drives sync cycles
//!
//! Collaborator adapters (user store, calendar client, chat platform) are
//! supplied by the host and injected into
//! [`StatusSyncService`](statussync_core::StatusSyncService).

pub mod config;
pub mod observability;
pub mod scheduling;

pub use config::{load, load_from_env, load_from_file, probe_config_paths};
pub use observability::logging::init_tracing;
pub use observability::metrics::SyncMetrics;
pub use scheduling::{SchedulerError, SchedulerResult, StatusSyncScheduler};
