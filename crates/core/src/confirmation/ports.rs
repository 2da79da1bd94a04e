//! Port interfaces for interactive messaging

use async_trait::async_trait;
use statussync_domain::{ConfirmationRequest, NotificationHandle, Result};

/// Trait for delivering accept/decline prompts to a user
///
/// The answer comes back later through
/// [`StatusSyncService::handle_confirmation`](crate::sync::StatusSyncService::handle_confirmation).
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_confirmation(&self, request: &ConfirmationRequest) -> Result<NotificationHandle>;
}
