//! Port interfaces for the chat platform presence API

use std::collections::HashMap;

use async_trait::async_trait;
use statussync_domain::{PresenceStatus, Result};

/// Trait for reading and writing user presence
#[async_trait]
pub trait PresencePlatform: Send + Sync {
    /// Read presence for many users in a single call.
    ///
    /// Users missing from the returned map are treated as unreadable and
    /// skipped for the cycle.
    async fn get_presence(&self, user_ids: &[String]) -> Result<HashMap<String, PresenceStatus>>;

    /// Set one user's presence
    async fn set_presence(&self, user_id: &str, status: PresenceStatus) -> Result<()>;
}
