//! Error types used throughout the sync engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for status synchronization
///
/// Collaborator failures are mapped onto the variant naming the collaborator,
/// so callers can tell a calendar outage from a presence-platform outage
/// without inspecting messages.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StatusSyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Remote calendar error: {0}")]
    Remote(String),

    #[error("Presence error: {0}")]
    Presence(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StatusSyncError {
    /// Stable label suitable for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Store(_) => "store",
            Self::Remote(_) => "remote",
            Self::Presence(_) => "presence",
            Self::Messaging(_) => "messaging",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, StatusSyncError>;
