//! In-memory port implementations that record every call

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use statussync_core::{BusyViewBatch, CalendarRemote, Messenger, PresencePlatform, UserDirectory};
use statussync_domain::{
    ActiveEventSet, ConfirmationRequest, NotificationHandle, PresenceStatus, RemoteEvent,
    Result as DomainResult, StatusSyncError, TimeWindow, User, UserRef,
};

/// In-memory user store.
///
/// The index is derived from inserted users in insertion order.
#[derive(Default)]
pub struct MockUserDirectory {
    order: Mutex<Vec<String>>,
    users: Mutex<HashMap<String, User>>,
    failing_loads: Mutex<HashSet<String>>,
    fail_index: Mutex<bool>,
    fail_store: Mutex<bool>,
    stores: Mutex<Vec<(String, ActiveEventSet)>>,
}

impl MockUserDirectory {
    pub fn insert(&self, user: User) {
        let mut order = self.order.lock();
        if !order.contains(&user.user_id) {
            order.push(user.user_id.clone());
        }
        self.users.lock().insert(user.user_id.clone(), user);
    }

    pub fn fail_load_for(&self, user_id: &str) {
        self.failing_loads.lock().insert(user_id.to_string());
    }

    pub fn restore_load_for(&self, user_id: &str) {
        self.failing_loads.lock().remove(user_id);
    }

    pub fn fail_index(&self) {
        *self.fail_index.lock() = true;
    }

    pub fn fail_stores(&self) {
        *self.fail_store.lock() = true;
    }

    pub fn stores(&self) -> Vec<(String, ActiveEventSet)> {
        self.stores.lock().clone()
    }

    pub fn active_events(&self, user_id: &str) -> ActiveEventSet {
        self.users.lock().get(user_id).map(|u| u.active_events.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list_users(&self) -> DomainResult<Vec<UserRef>> {
        if *self.fail_index.lock() {
            return Err(StatusSyncError::Store("index unavailable".into()));
        }
        let users = self.users.lock();
        Ok(self.order.lock().iter().filter_map(|id| users.get(id)).map(User::to_ref).collect())
    }

    async fn load_user(&self, user_id: &str) -> DomainResult<User> {
        if self.failing_loads.lock().contains(user_id) {
            return Err(StatusSyncError::Store(format!("corrupt record for {user_id}")));
        }
        self.users
            .lock()
            .get(user_id)
            .cloned()
            .ok_or_else(|| StatusSyncError::NotFound(format!("user {user_id}")))
    }

    async fn store_active_events(&self, user_id: &str, events: &ActiveEventSet) -> DomainResult<()> {
        if *self.fail_store.lock() {
            return Err(StatusSyncError::Store("write rejected".into()));
        }
        self.stores.lock().push((user_id.to_string(), events.clone()));
        if let Some(user) = self.users.lock().get_mut(user_id) {
            user.active_events = events.clone();
        }
        Ok(())
    }
}

/// Calendar batch endpoint keyed by remote user id
#[derive(Default)]
pub struct MockCalendarRemote {
    responses: Mutex<HashMap<String, DomainResult<Vec<RemoteEvent>>>>,
    fail_batch: Mutex<bool>,
    calls: Mutex<Vec<(Vec<String>, TimeWindow)>>,
}

impl MockCalendarRemote {
    pub fn set_events(&self, remote_id: &str, events: Vec<RemoteEvent>) {
        self.responses.lock().insert(remote_id.to_string(), Ok(events));
    }

    pub fn fail_for(&self, remote_id: &str) {
        self.responses
            .lock()
            .insert(remote_id.to_string(), Err(StatusSyncError::Remote("throttled".into())));
    }

    pub fn fail_batch(&self) {
        *self.fail_batch.lock() = true;
    }

    /// Remote ids requested per batch call
    pub fn calls(&self) -> Vec<(Vec<String>, TimeWindow)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CalendarRemote for MockCalendarRemote {
    async fn batch_view_busy(&self, users: &[UserRef], window: TimeWindow) -> DomainResult<BusyViewBatch> {
        self.calls.lock().push((users.iter().map(|u| u.remote_id.clone()).collect(), window));
        if *self.fail_batch.lock() {
            return Err(StatusSyncError::Remote("batch transport failed".into()));
        }
        let responses = self.responses.lock();
        Ok(users
            .iter()
            .filter_map(|u| responses.get(&u.remote_id).map(|r| (u.remote_id.clone(), r.clone())))
            .collect())
    }
}

/// Presence store with call recording
#[derive(Default)]
pub struct MockPresencePlatform {
    statuses: Mutex<HashMap<String, PresenceStatus>>,
    fail_read: Mutex<bool>,
    failing_writes: Mutex<HashSet<String>>,
    reads: Mutex<Vec<Vec<String>>>,
    writes: Mutex<Vec<(String, PresenceStatus)>>,
}

impl MockPresencePlatform {
    pub fn set(&self, user_id: &str, status: PresenceStatus) {
        self.statuses.lock().insert(user_id.to_string(), status);
    }

    pub fn status(&self, user_id: &str) -> Option<PresenceStatus> {
        self.statuses.lock().get(user_id).copied()
    }

    pub fn fail_read(&self) {
        *self.fail_read.lock() = true;
    }

    pub fn fail_write_for(&self, user_id: &str) {
        self.failing_writes.lock().insert(user_id.to_string());
    }

    pub fn reads(&self) -> Vec<Vec<String>> {
        self.reads.lock().clone()
    }

    pub fn writes(&self) -> Vec<(String, PresenceStatus)> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl PresencePlatform for MockPresencePlatform {
    async fn get_presence(&self, user_ids: &[String]) -> DomainResult<HashMap<String, PresenceStatus>> {
        self.reads.lock().push(user_ids.to_vec());
        if *self.fail_read.lock() {
            return Err(StatusSyncError::Presence("status endpoint down".into()));
        }
        let statuses = self.statuses.lock();
        Ok(user_ids
            .iter()
            .filter_map(|id| statuses.get(id).map(|s| (id.clone(), *s)))
            .collect())
    }

    async fn set_presence(&self, user_id: &str, status: PresenceStatus) -> DomainResult<()> {
        if self.failing_writes.lock().contains(user_id) {
            return Err(StatusSyncError::Presence(format!("cannot update {user_id}")));
        }
        self.writes.lock().push((user_id.to_string(), status));
        self.statuses.lock().insert(user_id.to_string(), status);
        Ok(())
    }
}

/// Messenger that keeps every request it was asked to deliver
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<ConfirmationRequest>>,
    fail: Mutex<bool>,
}

impl RecordingMessenger {
    pub fn fail_sends(&self) {
        *self.fail.lock() = true;
    }

    pub fn sent(&self) -> Vec<ConfirmationRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_confirmation(&self, request: &ConfirmationRequest) -> DomainResult<NotificationHandle> {
        if *self.fail.lock() {
            return Err(StatusSyncError::Messaging("direct message rejected".into()));
        }
        let mut sent = self.sent.lock();
        sent.push(request.clone());
        Ok(NotificationHandle { message_id: format!("post-{}", sent.len()) })
    }
}
