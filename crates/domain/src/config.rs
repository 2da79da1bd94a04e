//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_JOB_TIMEOUT_SECONDS, DEFAULT_LIFECYCLE_TIMEOUT_SECONDS, DEFAULT_LOG_LEVEL,
    DEFAULT_LOOKAHEAD_SECONDS, DEFAULT_MAX_CONCURRENT_USERS, DEFAULT_SYNC_CRON,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// Sync cycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Width of the calendar window queried each cycle, starting at "now".
    pub lookahead_seconds: u64,
    /// Upper bound on users whose decisions are applied concurrently.
    pub max_concurrent_users: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lookahead_seconds: DEFAULT_LOOKAHEAD_SECONDS,
            max_concurrent_users: DEFAULT_MAX_CONCURRENT_USERS,
        }
    }
}

/// Cron scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub cron_expression: String,
    pub job_timeout_seconds: u64,
    pub start_timeout_seconds: u64,
    pub stop_timeout_seconds: u64,
    pub join_timeout_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: DEFAULT_SYNC_CRON.to_string(),
            job_timeout_seconds: DEFAULT_JOB_TIMEOUT_SECONDS,
            start_timeout_seconds: DEFAULT_LIFECYCLE_TIMEOUT_SECONDS,
            stop_timeout_seconds: DEFAULT_LIFECYCLE_TIMEOUT_SECONDS,
            join_timeout_seconds: DEFAULT_LIFECYCLE_TIMEOUT_SECONDS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
