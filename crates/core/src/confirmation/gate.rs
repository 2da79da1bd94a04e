//! Confirmation gate
//!
//! Holds at most one pending confirmation per user. A pending confirmation is
//! superseded, not timed out: the next cycle that computes a different
//! active-event set, applies a direct change, or asks again replaces it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use statussync_domain::{
    ActiveEventSet, ConfirmationRequest, DecisionReason, EventSummary, PendingConfirmation,
    PresenceStatus, Result, StatusSyncError,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::ports::Messenger;

/// Interactive checkpoint in front of presence changes
pub struct ConfirmationGate {
    messenger: Arc<dyn Messenger>,
    pending: Mutex<HashMap<String, PendingConfirmation>>,
}

impl ConfirmationGate {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger, pending: Mutex::new(HashMap::new()) }
    }

    /// Send an accept/decline prompt instead of changing presence.
    ///
    /// The token is registered before the message goes out, so an answer
    /// arriving while the send is still in flight finds it. A failed send
    /// rolls the registration back and restores whatever it replaced.
    pub async fn request_confirmation(
        &self,
        user_id: &str,
        current: PresenceStatus,
        proposed: PresenceStatus,
        next_active: ActiveEventSet,
        reason: DecisionReason,
        triggering_event: Option<EventSummary>,
    ) -> Result<PendingConfirmation> {
        let pending = PendingConfirmation {
            token: Uuid::new_v4(),
            user_id: user_id.to_string(),
            proposed,
            previous_presence: current,
            next_active,
            reason,
            triggering_event,
            created_at: Utc::now(),
        };

        let replaced = self.pending.lock().insert(user_id.to_string(), pending.clone());
        if let Some(ref replaced) = replaced {
            debug!(user_id, token = %replaced.token, "replaced pending confirmation");
        }

        let request = ConfirmationRequest::from_pending(&pending);
        let handle = match self.messenger.send_confirmation(&request).await {
            Ok(handle) => handle,
            Err(err) => {
                self.roll_back(user_id, pending.token, replaced);
                return Err(err);
            }
        };

        info!(
            user_id,
            token = %pending.token,
            message_id = %handle.message_id,
            proposed = %proposed,
            "confirmation requested"
        );
        Ok(pending)
    }

    /// Undo a registration whose message never went out. Entries written by
    /// anyone else in the meantime are left alone.
    fn roll_back(&self, user_id: &str, token: Uuid, replaced: Option<PendingConfirmation>) {
        let mut pending = self.pending.lock();
        if pending.get(user_id).map(|p| p.token) != Some(token) {
            return;
        }
        match replaced {
            Some(previous) => {
                pending.insert(user_id.to_string(), previous);
            }
            None => {
                pending.remove(user_id);
            }
        }
    }

    /// Drop the user's pending confirmation if it was computed for a
    /// different active-event set than `next_active`.
    pub fn supersede_stale(
        &self,
        user_id: &str,
        next_active: &ActiveEventSet,
    ) -> Option<PendingConfirmation> {
        let mut pending = self.pending.lock();
        let stale = pending.get(user_id).is_some_and(|p| &p.next_active != next_active);
        let removed = if stale { pending.remove(user_id) } else { None };
        drop(pending);

        if let Some(ref removed) = removed {
            debug!(user_id, token = %removed.token, "pending confirmation superseded by new events");
        }
        removed
    }

    /// Drop the user's pending confirmation unconditionally.
    pub fn supersede(&self, user_id: &str) -> Option<PendingConfirmation> {
        self.pending.lock().remove(user_id)
    }

    /// Look up a pending confirmation by token without claiming it.
    ///
    /// # Errors
    /// `StatusSyncError::NotFound` under the same conditions as [`Self::take`].
    pub fn get(&self, token: Uuid) -> Result<PendingConfirmation> {
        self.pending
            .lock()
            .values()
            .find(|p| p.token == token)
            .cloned()
            .ok_or_else(|| not_found(token))
    }

    /// Claim a pending confirmation by token.
    ///
    /// # Errors
    /// `StatusSyncError::NotFound` when the token was never issued, was
    /// already answered, or has been superseded.
    pub fn take(&self, token: Uuid) -> Result<PendingConfirmation> {
        let mut pending = self.pending.lock();
        let user_id = pending
            .iter()
            .find(|(_, p)| p.token == token)
            .map(|(user_id, _)| user_id.clone())
            .ok_or_else(|| not_found(token))?;

        pending.remove(&user_id).ok_or_else(|| {
            StatusSyncError::Internal(format!("pending confirmation for {user_id} vanished"))
        })
    }

    pub fn pending_for(&self, user_id: &str) -> Option<PendingConfirmation> {
        self.pending.lock().get(user_id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

fn not_found(token: Uuid) -> StatusSyncError {
    StatusSyncError::NotFound(format!(
        "no pending confirmation for token {token} (answered or superseded)"
    ))
}
