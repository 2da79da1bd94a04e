//! Port interfaces for the user directory
//!
//! User storage and indexing live outside the engine. The engine reads the
//! index once per cycle, loads each user, and writes back only the
//! active-event set.

use async_trait::async_trait;
use statussync_domain::{ActiveEventSet, Result, User, UserRef};

/// Trait for user index access and active-event persistence
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// List every connected user; opt-in filtering happens after loading.
    async fn list_users(&self) -> Result<Vec<UserRef>>;

    /// Load a full user record by chat platform id
    async fn load_user(&self, user_id: &str) -> Result<User>;

    /// Overwrite the user's active-event set (last writer wins)
    async fn store_active_events(&self, user_id: &str, events: &ActiveEventSet) -> Result<()>;
}
