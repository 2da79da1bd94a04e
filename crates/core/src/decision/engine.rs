//! Availability decision engine
//!
//! Given what was tracked last cycle, what is busy now, and what presence the
//! platform currently shows, compute the next active-event set and whether
//! presence should move. No I/O, no clocks, no counters: identical inputs
//! always produce identical decisions.
//!
//! Presence rules, in priority order:
//! 1. A busy event appeared that was not tracked before and presence is not
//!    the busy-equivalent: switch to busy.
//! 2. Everything tracked has ended and presence is still the busy-equivalent:
//!    switch back to online.
//! 3. Otherwise leave presence alone. This includes a user who moved away from
//!    the busy state by hand while a tracked event is still running.

use statussync_domain::{
    ActiveEventSet, DecisionReason, EventHash, PresenceStatus, SyncDecision,
};

/// Decide the next state for one user.
///
/// `busy_presence` is the user's busy-equivalent (`dnd`, or `away` for users
/// who keep notifications during meetings). Duplicate hashes in `busy` are
/// collapsed.
pub fn decide(
    previous: &ActiveEventSet,
    busy: &[EventHash],
    current: PresenceStatus,
    busy_presence: PresenceStatus,
) -> SyncDecision {
    let mut next_active = ActiveEventSet::new();
    let mut newly_busy = Vec::new();

    for hash in busy {
        if next_active.insert(hash.clone()) && !previous.contains(hash) {
            newly_busy.push(hash.clone());
        }
    }

    let (desired_presence, reason) = if !newly_busy.is_empty() {
        if current == busy_presence {
            (None, DecisionReason::AlreadyBusy)
        } else {
            (Some(busy_presence), DecisionReason::EventStarted)
        }
    } else if next_active.is_empty() {
        if previous.is_empty() {
            (None, DecisionReason::NoActivity)
        } else if current == busy_presence {
            (Some(PresenceStatus::AVAILABLE), DecisionReason::EventsEnded)
        } else {
            (None, DecisionReason::ManualOverride)
        }
    } else if &next_active != previous {
        (None, DecisionReason::PartialEnd)
    } else if current == busy_presence {
        (None, DecisionReason::StillInEvent)
    } else {
        (None, DecisionReason::ManualOverride)
    };

    SyncDecision { next_active, desired_presence, reason, newly_busy }
}
