//! Domain constants
//!
//! Centralized location for engine-level constants and configuration defaults.

/// Separator between the provider event id and its start instant in an
/// event identity hash.
pub const EVENT_HASH_SEPARATOR: &str = " ";

// Sync defaults
pub const DEFAULT_LOOKAHEAD_SECONDS: u64 = 120;
pub const DEFAULT_MAX_CONCURRENT_USERS: usize = 16;

// Scheduler defaults
pub const DEFAULT_SYNC_CRON: &str = "0 */5 * * * *"; // every 5 minutes
pub const DEFAULT_JOB_TIMEOUT_SECONDS: u64 = 240;
pub const DEFAULT_LIFECYCLE_TIMEOUT_SECONDS: u64 = 5;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Confirmation message actions
pub const CONFIRMATION_ACTION_ACCEPT: &str = "accept";
pub const CONFIRMATION_ACTION_DECLINE: &str = "decline";
