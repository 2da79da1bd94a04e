//! Status synchronization: one cycle across all opted-in users

pub mod report;
pub mod service;

pub use report::{FailureStage, SyncReport, UserOutcome, UserSyncFailure, UserSyncResult};
pub use service::{ConfirmationOutcome, StatusSyncService};
