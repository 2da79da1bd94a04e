//! Configuration loader
//!
//! Loads sync engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If `STATUSSYNC_CRON` is set, loads from environment variables and
//!    returns their errors as-is
//! 2. Otherwise loads from file, probing multiple paths
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `STATUSSYNC_CRON`: Cron expression for sync cycles (required)
//! - `STATUSSYNC_LOOKAHEAD_SECONDS`: Calendar query window in seconds
//! - `STATUSSYNC_MAX_CONCURRENT_USERS`: Per-user apply concurrency
//! - `STATUSSYNC_JOB_TIMEOUT_SECONDS`: Time budget for a single cycle
//! - `STATUSSYNC_LOG_LEVEL`: Default tracing filter directive
//! - `STATUSSYNC_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! Unset optional variables keep their defaults; set but unparseable ones
//! are errors.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./statussync.toml` or `./statussync.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent directory
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use statussync_domain::{Config, Result, StatusSyncError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["statussync.toml", "statussync.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `StatusSyncError::Config` if configuration cannot be loaded from
/// either source or the file is invalid.
pub fn load() -> Result<Config> {
    if std::env::var_os("STATUSSYNC_CRON").is_none() {
        tracing::debug!("STATUSSYNC_CRON not set, loading configuration from file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `StatusSyncError::Config` if `STATUSSYNC_CRON` is missing or any
/// set variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.scheduler.cron_expression = env_var("STATUSSYNC_CRON")?;

    if let Some(lookahead) = env_parse("STATUSSYNC_LOOKAHEAD_SECONDS")? {
        config.sync.lookahead_seconds = lookahead;
    }
    if let Some(max_users) = env_parse("STATUSSYNC_MAX_CONCURRENT_USERS")? {
        config.sync.max_concurrent_users = max_users;
    }
    if let Some(job_timeout) = env_parse("STATUSSYNC_JOB_TIMEOUT_SECONDS")? {
        config.scheduler.job_timeout_seconds = job_timeout;
    }
    if let Ok(level) = std::env::var("STATUSSYNC_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("STATUSSYNC_LOG_JSON", config.logging.json);

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`]. Format is chosen by extension.
///
/// # Errors
/// Returns `StatusSyncError::Config` if the file is missing, unreadable,
/// malformed, or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StatusSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StatusSyncError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StatusSyncError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StatusSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StatusSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(StatusSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.scheduler.cron_expression.trim().is_empty() {
        return Err(StatusSyncError::Config("scheduler.cron_expression must not be empty".into()));
    }
    if config.sync.lookahead_seconds == 0 {
        return Err(StatusSyncError::Config("sync.lookahead_seconds must be positive".into()));
    }
    if config.scheduler.job_timeout_seconds == 0 {
        return Err(StatusSyncError::Config("scheduler.job_timeout_seconds must be positive".into()));
    }
    Ok(())
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        StatusSyncError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional numeric variable; `Ok(None)` when unset.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| StatusSyncError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
