//! Sync cycle report
//!
//! Per-user failures are collected here instead of being returned as errors,
//! so one broken account never hides the outcome for everyone else.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use statussync_domain::{DecisionReason, PresenceStatus, StatusSyncError};
use uuid::Uuid;

/// Step of the per-user pipeline that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    LoadUser,
    RemoteQuery,
    PresenceRead,
    Classification,
    PresenceWrite,
    Confirmation,
    Persist,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoadUser => "load_user",
            Self::RemoteQuery => "remote_query",
            Self::PresenceRead => "presence_read",
            Self::Classification => "classification",
            Self::PresenceWrite => "presence_write",
            Self::Confirmation => "confirmation",
            Self::Persist => "persist",
        };
        f.write_str(label)
    }
}

/// One per-user failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSyncFailure {
    pub user_id: String,
    pub stage: FailureStage,
    pub error: StatusSyncError,
}

impl UserSyncFailure {
    pub fn new(user_id: impl Into<String>, stage: FailureStage, error: StatusSyncError) -> Self {
        Self { user_id: user_id.into(), stage, error }
    }
}

impl fmt::Display for UserSyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.user_id, self.stage, self.error)
    }
}

/// What happened for one user whose decision was computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOutcome {
    pub user_id: String,
    pub reason: DecisionReason,
    /// Presence actually written through the direct path
    pub presence_applied: Option<PresenceStatus>,
    /// Token of the confirmation sent instead of a direct write
    pub confirmation_token: Option<Uuid>,
    pub active_set_stored: bool,
}

impl UserOutcome {
    pub fn new(user_id: impl Into<String>, reason: DecisionReason) -> Self {
        Self {
            user_id: user_id.into(),
            reason,
            presence_applied: None,
            confirmation_token: None,
            active_set_stored: false,
        }
    }
}

/// Result of processing one user: an outcome when a decision was reached,
/// plus any failures along the way.
#[derive(Debug, Clone, Default)]
pub struct UserSyncResult {
    pub outcome: Option<UserOutcome>,
    pub failures: Vec<UserSyncFailure>,
}

impl UserSyncResult {
    pub fn failed(failure: UserSyncFailure) -> Self {
        Self { outcome: None, failures: vec![failure] }
    }
}

/// Summary of a full sync cycle
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub users_in_index: usize,
    pub users_opted_in: usize,
    pub outcomes: Vec<UserOutcome>,
    pub failures: Vec<UserSyncFailure>,
}

impl SyncReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            users_in_index: 0,
            users_opted_in: 0,
            outcomes: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, result: UserSyncResult) {
        if let Some(outcome) = result.outcome {
            self.outcomes.push(outcome);
        }
        self.failures.extend(result.failures);
    }

    pub fn record_failure(&mut self, failure: UserSyncFailure) {
        self.failures.push(failure);
    }

    pub fn finish(mut self, finished_at: DateTime<Utc>) -> Self {
        self.finished_at = Some(finished_at);
        self
    }

    pub fn presence_updates(&self) -> usize {
        self.outcomes.iter().filter(|o| o.presence_applied.is_some()).count()
    }

    pub fn confirmations_requested(&self) -> usize {
        self.outcomes.iter().filter(|o| o.confirmation_token.is_some()).count()
    }

    pub fn active_sets_stored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.active_set_stored).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn outcome_for(&self, user_id: &str) -> Option<&UserOutcome> {
        self.outcomes.iter().find(|o| o.user_id == user_id)
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} users opted in; {} presence updates, {} confirmations, {} active sets stored, {} failures",
            self.users_opted_in,
            self.users_in_index,
            self.presence_updates(),
            self.confirmations_requested(),
            self.active_sets_stored(),
            self.failures.len()
        )
    }
}
