//! # StatusSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for every external collaborator
//! - The event classifier and availability decision engine
//! - The confirmation gate
//! - The batch orchestrator driving one sync cycle
//!
//! ## Architecture Principles
//! - Only depends on `statussync-domain`
//! - No storage, HTTP, or platform code
//! - All external dependencies via traits
//! - Classifier and decision engine are plain functions

pub mod calendar_ports;
pub mod classification;
pub mod confirmation;
pub mod decision;
pub mod presence;
pub mod sync;
pub mod user;

pub use calendar_ports::{BusyViewBatch, CalendarRemote};
pub use classification::{busy_hashes, classify_event, classify_events, event_hash};
pub use confirmation::{ConfirmationGate, Messenger};
pub use decision::decide;
pub use presence::PresencePlatform;
pub use sync::{
    ConfirmationOutcome, FailureStage, StatusSyncService, SyncReport, UserOutcome,
    UserSyncFailure,
};
pub use user::UserDirectory;
