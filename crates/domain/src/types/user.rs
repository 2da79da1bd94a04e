//! User types
//!
//! A user is loaded fresh from the user directory on every sync cycle.

use serde::{Deserialize, Serialize};

use super::active_events::ActiveEventSet;
use super::presence::PresenceStatus;

/// Lightweight user index entry used to fan out a sync cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    /// Chat platform user id
    pub user_id: String,
    /// Linked calendar account id
    pub remote_id: String,
    pub email: String,
}

/// Linked calendar account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub mail: String,
}

/// Per-user sync settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opt-in for calendar driven presence updates
    pub update_status: bool,
    /// Ask before changing presence instead of applying directly
    pub get_confirmation: bool,
    /// Use `away` rather than `dnd` while in a meeting
    pub receive_notifications_during_meeting: bool,
}

impl Settings {
    /// Presence that represents "in a meeting" for this user.
    pub fn busy_presence(&self) -> PresenceStatus {
        if self.receive_notifications_during_meeting {
            PresenceStatus::Away
        } else {
            PresenceStatus::DoNotDisturb
        }
    }
}

/// Fully loaded user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub remote: RemoteUser,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub active_events: ActiveEventSet,
}

impl User {
    /// Build the index entry for this user.
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            user_id: self.user_id.clone(),
            remote_id: self.remote.id.clone(),
            email: self.remote.mail.clone(),
        }
    }
}
