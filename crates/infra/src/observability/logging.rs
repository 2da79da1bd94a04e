//! Tracing subscriber initialisation

use statussync_domain::{LoggingConfig, Result, StatusSyncError};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns an error if the
/// level directive is invalid or a global subscriber is already installed;
/// callers that may initialise twice (tests) can ignore the latter.
///
/// # Errors
/// `StatusSyncError::Config` for an invalid filter directive,
/// `StatusSyncError::Internal` if a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json {
        fmt().json().with_env_filter(filter).with_target(true).try_init()
    } else {
        fmt().with_env_filter(filter).with_target(true).try_init()
    };

    installed.map_err(|e| StatusSyncError::Internal(format!("tracing already initialised: {e}")))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        StatusSyncError::Config(format!("Invalid log level '{}': {e}", config.level))
    })
}
