//! Confirmation gate artifacts
//!
//! A pending confirmation is a self-contained token: it carries everything the
//! apply path needs so that an accept arriving minutes later re-enters the
//! same code used for direct updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::active_events::ActiveEventSet;
use super::decision::DecisionReason;
use super::event::EventSummary;
use super::presence::PresenceStatus;
use crate::constants::{CONFIRMATION_ACTION_ACCEPT, CONFIRMATION_ACTION_DECLINE};

/// Presence change waiting for the user's approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub token: Uuid,
    pub user_id: String,
    pub proposed: PresenceStatus,
    pub previous_presence: PresenceStatus,
    pub next_active: ActiveEventSet,
    pub reason: DecisionReason,
    pub triggering_event: Option<EventSummary>,
    pub created_at: DateTime<Utc>,
}

/// Interactive message handed to the messaging collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub token: Uuid,
    pub user_id: String,
    pub current: PresenceStatus,
    pub proposed: PresenceStatus,
    pub triggering_event: Option<EventSummary>,
    pub message: String,
    pub accept_action: String,
    pub decline_action: String,
}

impl ConfirmationRequest {
    pub fn from_pending(pending: &PendingConfirmation) -> Self {
        let message = match &pending.triggering_event {
            Some(event) => format!(
                "Your event \"{}\" starts at {}. Change your status from {} to {}?",
                event.subject.as_deref().unwrap_or("(no subject)"),
                event.start.format("%H:%M UTC"),
                pending.previous_presence,
                pending.proposed
            ),
            None => format!(
                "Your calendar events have ended. Change your status from {} to {}?",
                pending.previous_presence, pending.proposed
            ),
        };

        Self {
            token: pending.token,
            user_id: pending.user_id.clone(),
            current: pending.previous_presence,
            proposed: pending.proposed,
            triggering_event: pending.triggering_event.clone(),
            message,
            accept_action: CONFIRMATION_ACTION_ACCEPT.to_string(),
            decline_action: CONFIRMATION_ACTION_DECLINE.to_string(),
        }
    }
}

/// Handle returned by the messaging collaborator for a delivered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHandle {
    pub message_id: String,
}

/// User's answer, delivered asynchronously by the action callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationResponse {
    Accept,
    Decline,
}

impl ConfirmationResponse {
    /// Map an action id from the interactive message.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            CONFIRMATION_ACTION_ACCEPT => Some(Self::Accept),
            CONFIRMATION_ACTION_DECLINE => Some(Self::Decline),
            _ => None,
        }
    }
}
