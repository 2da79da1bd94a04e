//! Status sync service - batch orchestration of one sync cycle
//!
//! A cycle performs exactly two batched reads (calendar busy view, then
//! presence) regardless of how many users are opted in. Everything after
//! that is per user: classify, decide, then either ask for confirmation or
//! apply directly. Per-user failures are recorded in the [`SyncReport`]; only
//! failures that leave no per-user data to work with abort the cycle.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use statussync_domain::constants::DEFAULT_LOOKAHEAD_SECONDS;
use statussync_domain::{
    ActiveEventSet, ClassifiedEvent, ConfirmationResponse, PresenceStatus, RemoteEvent, Result,
    StatusSyncError, SyncConfig, TimeWindow, User, UserRef,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::report::{FailureStage, SyncReport, UserOutcome, UserSyncFailure, UserSyncResult};
use crate::calendar_ports::CalendarRemote;
use crate::classification::{busy_hashes, classify_events};
use crate::confirmation::{ConfirmationGate, Messenger};
use crate::decision::decide;
use crate::presence::PresencePlatform;
use crate::user::UserDirectory;

/// Everything needed to decide for one user, assembled from the batch reads
struct UserContext {
    user: User,
    events: Vec<RemoteEvent>,
    current: PresenceStatus,
}

/// Result of answering a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Applied(PresenceStatus),
    Declined,
}

/// Status synchronization service
pub struct StatusSyncService {
    users: Arc<dyn UserDirectory>,
    calendar: Arc<dyn CalendarRemote>,
    presence: Arc<dyn PresencePlatform>,
    gate: ConfirmationGate,
    config: SyncConfig,
}

impl StatusSyncService {
    /// Create a new status sync service
    pub fn new(
        users: Arc<dyn UserDirectory>,
        calendar: Arc<dyn CalendarRemote>,
        presence: Arc<dyn PresencePlatform>,
        messenger: Arc<dyn Messenger>,
        config: SyncConfig,
    ) -> Self {
        Self { users, calendar, presence, gate: ConfirmationGate::new(messenger), config }
    }

    /// Access the confirmation gate, e.g. to inspect pending prompts.
    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    /// Run one sync cycle for every opted-in user.
    ///
    /// # Errors
    /// Aborts only when the user index, the whole calendar batch, or the
    /// presence batch read fails. Per-user problems are in the report.
    pub async fn sync_all(&self) -> Result<SyncReport> {
        self.sync_all_at(Utc::now()).await
    }

    /// Run one sync cycle using `now` as the reference instant.
    #[instrument(skip(self))]
    pub async fn sync_all_at(&self, now: DateTime<Utc>) -> Result<SyncReport> {
        let mut report = SyncReport::new(now);

        let index = self.users.list_users().await.map_err(|err| {
            error!(kind = err.label(), error = %err, "failed to load user index, aborting sync cycle");
            err
        })?;
        report.users_in_index = index.len();

        let users = self.load_opted_in(&index, &mut report).await;
        report.users_opted_in = users.len();

        if users.is_empty() {
            debug!(users_in_index = index.len(), "no opted-in users, skipping remote queries");
            return Ok(report.finish(Utc::now()));
        }

        let contexts = self.fetch_contexts(users, now, &mut report).await?;

        for chunk in contexts.chunks(self.concurrency()) {
            let results = join_all(chunk.iter().map(|ctx| self.process_user(ctx))).await;
            for result in results {
                report.record(result);
            }
        }

        let report = report.finish(Utc::now());
        if report.is_clean() {
            info!(summary = %report, "status sync cycle completed");
        } else {
            warn!(summary = %report, "status sync cycle completed with failures");
        }
        Ok(report)
    }

    /// Answer a pending confirmation.
    ///
    /// Accepting re-enters the same apply path used for direct updates, with
    /// the active-event set compared against a freshly loaded user.
    ///
    /// # Errors
    /// `NotFound` for unknown, answered or superseded tokens; the first
    /// collaborator error when applying an accepted change fails.
    #[instrument(skip(self))]
    pub async fn handle_confirmation(
        &self,
        token: Uuid,
        response: ConfirmationResponse,
    ) -> Result<ConfirmationOutcome> {
        match response {
            ConfirmationResponse::Decline => {
                let pending = self.gate.take(token)?;
                info!(user_id = %pending.user_id, "presence change declined");
                Ok(ConfirmationOutcome::Declined)
            }
            ConfirmationResponse::Accept => {
                // The token stays answerable until the user reload succeeds.
                let pending = self.gate.get(token)?;
                let user = self.users.load_user(&pending.user_id).await?;
                let pending = self.gate.take(token)?;
                let mut result = UserSyncResult {
                    outcome: Some(UserOutcome::new(&pending.user_id, pending.reason)),
                    failures: Vec::new(),
                };

                self.apply_change(
                    &pending.user_id,
                    Some(pending.proposed),
                    &pending.next_active,
                    &user.active_events,
                    &mut result,
                )
                .await;

                if let Some(failure) = result.failures.into_iter().next() {
                    return Err(failure.error);
                }

                info!(user_id = %pending.user_id, status = %pending.proposed, "confirmed presence change applied");
                Ok(ConfirmationOutcome::Applied(pending.proposed))
            }
        }
    }

    /// Answer a pending confirmation from an interactive action id.
    pub async fn handle_confirmation_action(
        &self,
        token: Uuid,
        action: &str,
    ) -> Result<ConfirmationOutcome> {
        let response = ConfirmationResponse::from_action(action).ok_or_else(|| {
            StatusSyncError::InvalidInput(format!("unknown confirmation action: {action}"))
        })?;
        self.handle_confirmation(token, response).await
    }

    async fn load_opted_in(&self, index: &[UserRef], report: &mut SyncReport) -> Vec<User> {
        let mut users = Vec::with_capacity(index.len());

        for chunk in index.chunks(self.concurrency()) {
            let loaded = join_all(chunk.iter().map(|entry| self.users.load_user(&entry.user_id))).await;

            for (entry, result) in chunk.iter().zip(loaded) {
                match result {
                    Ok(user) if user.settings.update_status => users.push(user),
                    Ok(_) => debug!(user_id = %entry.user_id, "status sync disabled for user"),
                    Err(err) => {
                        warn!(user_id = %entry.user_id, kind = err.label(), error = %err, "failed to load user, skipping");
                        report.record_failure(UserSyncFailure::new(
                            &entry.user_id,
                            FailureStage::LoadUser,
                            err,
                        ));
                    }
                }
            }
        }

        users
    }

    /// Perform the two batch reads and pair their results with each user.
    async fn fetch_contexts(
        &self,
        users: Vec<User>,
        now: DateTime<Utc>,
        report: &mut SyncReport,
    ) -> Result<Vec<UserContext>> {
        let window = TimeWindow::starting_at(now, self.lookahead());
        let refs: Vec<UserRef> = users.iter().map(User::to_ref).collect();

        let calendars = self.calendar.batch_view_busy(&refs, window).await.map_err(|err| {
            error!(kind = err.label(), error = %err, users = refs.len(), "calendar batch query failed, aborting sync cycle");
            err
        })?;

        let user_ids: Vec<String> = users.iter().map(|user| user.user_id.clone()).collect();
        let mut statuses = self.presence.get_presence(&user_ids).await.map_err(|err| {
            error!(kind = err.label(), error = %err, users = user_ids.len(), "presence batch read failed, aborting sync cycle");
            err
        })?;

        let mut contexts = Vec::with_capacity(users.len());
        for user in users {
            let events = match calendars.get(&user.remote.id) {
                Some(Ok(events)) => events.clone(),
                Some(Err(err)) => {
                    warn!(user_id = %user.user_id, kind = err.label(), error = %err, "calendar query failed for user, skipping");
                    report.record_failure(UserSyncFailure::new(
                        &user.user_id,
                        FailureStage::RemoteQuery,
                        err.clone(),
                    ));
                    continue;
                }
                None => {
                    warn!(user_id = %user.user_id, "calendar batch returned nothing for user, skipping");
                    report.record_failure(UserSyncFailure::new(
                        &user.user_id,
                        FailureStage::RemoteQuery,
                        StatusSyncError::NotFound(format!(
                            "no calendar response for remote user {}",
                            user.remote.id
                        )),
                    ));
                    continue;
                }
            };

            let Some(current) = statuses.remove(&user.user_id) else {
                warn!(user_id = %user.user_id, "presence missing from batch read, skipping");
                report.record_failure(UserSyncFailure::new(
                    &user.user_id,
                    FailureStage::PresenceRead,
                    StatusSyncError::NotFound(format!("no presence for user {}", user.user_id)),
                ));
                continue;
            };

            contexts.push(UserContext { user, events, current });
        }

        Ok(contexts)
    }

    async fn process_user(&self, ctx: &UserContext) -> UserSyncResult {
        let user_id = ctx.user.user_id.as_str();

        let classified = match classify_events(&ctx.events) {
            Ok(classified) => classified,
            Err(err) => {
                warn!(user_id, kind = err.label(), error = %err, "failed to classify calendar events, skipping");
                return UserSyncResult::failed(UserSyncFailure::new(
                    user_id,
                    FailureStage::Classification,
                    err,
                ));
            }
        };

        let settings = ctx.user.settings;
        let decision = decide(
            &ctx.user.active_events,
            &busy_hashes(&classified),
            ctx.current,
            settings.busy_presence(),
        );

        debug!(
            user_id,
            reason = %decision.reason,
            current = %ctx.current,
            desired = ?decision.desired_presence,
            active = decision.next_active.len(),
            "status decision"
        );

        self.gate.supersede_stale(user_id, &decision.next_active);

        let mut result = UserSyncResult {
            outcome: Some(UserOutcome::new(user_id, decision.reason)),
            failures: Vec::new(),
        };

        match decision.desired_presence {
            Some(desired) if settings.get_confirmation => {
                let triggering_event = decision
                    .newly_busy
                    .first()
                    .and_then(|hash| classified.iter().find(|event| &event.hash == hash))
                    .map(ClassifiedEvent::summary);

                match self
                    .gate
                    .request_confirmation(
                        user_id,
                        ctx.current,
                        desired,
                        decision.next_active.clone(),
                        decision.reason,
                        triggering_event,
                    )
                    .await
                {
                    Ok(pending) => {
                        if let Some(outcome) = result.outcome.as_mut() {
                            outcome.confirmation_token = Some(pending.token);
                        }
                    }
                    Err(err) => {
                        warn!(user_id, kind = err.label(), error = %err, "failed to send confirmation");
                        result.failures.push(UserSyncFailure::new(
                            user_id,
                            FailureStage::Confirmation,
                            err,
                        ));
                    }
                }

                // Only the presence change is gated; tracking moves on regardless.
                self.persist_active_set(
                    user_id,
                    &decision.next_active,
                    &ctx.user.active_events,
                    &mut result,
                )
                .await;
            }
            desired => {
                if desired.is_some() {
                    self.gate.supersede(user_id);
                }
                self.apply_change(
                    user_id,
                    desired,
                    &decision.next_active,
                    &ctx.user.active_events,
                    &mut result,
                )
                .await;
            }
        }

        result
    }

    /// The single path through which presence changes and active-set writes
    /// are applied, for both direct updates and accepted confirmations.
    async fn apply_change(
        &self,
        user_id: &str,
        desired: Option<PresenceStatus>,
        next_active: &ActiveEventSet,
        stored: &ActiveEventSet,
        result: &mut UserSyncResult,
    ) {
        if let Some(status) = desired {
            match self.presence.set_presence(user_id, status).await {
                Ok(()) => {
                    info!(user_id, status = %status, "presence updated");
                    if let Some(outcome) = result.outcome.as_mut() {
                        outcome.presence_applied = Some(status);
                    }
                }
                Err(err) => {
                    warn!(user_id, kind = err.label(), error = %err, "presence update failed, still persisting active events");
                    result.failures.push(UserSyncFailure::new(
                        user_id,
                        FailureStage::PresenceWrite,
                        err,
                    ));
                }
            }
        }

        self.persist_active_set(user_id, next_active, stored, result).await;
    }

    async fn persist_active_set(
        &self,
        user_id: &str,
        next_active: &ActiveEventSet,
        stored: &ActiveEventSet,
        result: &mut UserSyncResult,
    ) {
        if next_active == stored {
            return;
        }

        match self.users.store_active_events(user_id, next_active).await {
            Ok(()) => {
                debug!(user_id, active = next_active.len(), "active events stored");
                if let Some(outcome) = result.outcome.as_mut() {
                    outcome.active_set_stored = true;
                }
            }
            Err(err) => {
                warn!(user_id, kind = err.label(), error = %err, "failed to store active events");
                result.failures.push(UserSyncFailure::new(user_id, FailureStage::Persist, err));
            }
        }
    }

    fn concurrency(&self) -> usize {
        self.config.max_concurrent_users.max(1)
    }

    fn lookahead(&self) -> Duration {
        Duration::from_std(std::time::Duration::from_secs(self.config.lookahead_seconds))
            .unwrap_or_else(|_| Duration::seconds(DEFAULT_LOOKAHEAD_SECONDS as i64))
    }
}
