//! Sync decision produced by the availability decision engine

use std::fmt;

use serde::{Deserialize, Serialize};

use super::active_events::ActiveEventSet;
use super::event::EventHash;
use super::presence::PresenceStatus;

/// Why the engine reached its presence outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Nothing tracked before, nothing busy now
    NoActivity,
    /// A new busy event started and presence is not busy yet
    EventStarted,
    /// A new busy event started but presence already shows busy
    AlreadyBusy,
    /// Every tracked event ended while presence still shows busy
    EventsEnded,
    /// Tracked events are still in progress
    StillInEvent,
    /// Presence was changed away from busy by someone else; left alone
    ManualOverride,
    /// Some tracked events ended while others continue
    PartialEnd,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoActivity => "no_activity",
            Self::EventStarted => "event_started",
            Self::AlreadyBusy => "already_busy",
            Self::EventsEnded => "events_ended",
            Self::StillInEvent => "still_in_event",
            Self::ManualOverride => "manual_override",
            Self::PartialEnd => "partial_end",
        };
        f.write_str(label)
    }
}

/// Per-user outcome of one decision
///
/// `desired_presence == None` means "leave presence alone", which is distinct
/// from requesting the value the user already has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDecision {
    pub next_active: ActiveEventSet,
    pub desired_presence: Option<PresenceStatus>,
    pub reason: DecisionReason,
    /// Busy events seen for the first time this cycle, in classifier order
    pub newly_busy: Vec<EventHash>,
}
