//! Domain types and models

pub mod active_events;
pub mod confirmation;
pub mod decision;
pub mod event;
pub mod presence;
pub mod user;

pub use active_events::ActiveEventSet;
pub use confirmation::{
    ConfirmationRequest, ConfirmationResponse, NotificationHandle, PendingConfirmation,
};
pub use decision::{DecisionReason, SyncDecision};
pub use event::{ClassifiedEvent, EventDateTime, EventHash, EventSummary, RemoteEvent, ShowAs, TimeWindow};
pub use presence::PresenceStatus;
pub use user::{RemoteUser, Settings, User, UserRef};
