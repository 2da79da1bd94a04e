//! Fixtures for users, events and a fully wired service

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use statussync_core::StatusSyncService;
use statussync_domain::{
    ActiveEventSet, EventDateTime, EventHash, RemoteEvent, RemoteUser, Settings, ShowAs,
    SyncConfig, User,
};

use super::mocks::{MockCalendarRemote, MockPresencePlatform, MockUserDirectory, RecordingMessenger};

/// Fixed reference instant for deterministic hashes
pub fn moment() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 24, 9, 0, 0).single().unwrap_or_default()
}

/// Hash of [`busy_event`] with the same id and start
pub fn hash_at(id: &str, start: DateTime<Utc>) -> EventHash {
    EventHash::new(format!("{id} {}", start.format("%Y-%m-%dT%H:%M:%SZ")))
}

pub fn event(id: &str, start: DateTime<Utc>, show_as: ShowAs) -> RemoteEvent {
    RemoteEvent {
        id: id.to_string(),
        subject: Some(format!("Meeting {id}")),
        start: EventDateTime::utc(start),
        end: None,
        show_as,
    }
}

pub fn busy_event(id: &str, start: DateTime<Utc>) -> RemoteEvent {
    event(id, start, ShowAs::Busy)
}

pub fn opted_in() -> Settings {
    Settings { update_status: true, ..Settings::default() }
}

pub fn user(user_id: &str, settings: Settings, active: &[EventHash]) -> User {
    User {
        user_id: user_id.to_string(),
        remote: RemoteUser {
            id: remote_id(user_id),
            mail: format!("{user_id}@example.com"),
        },
        settings,
        active_events: active.iter().cloned().collect::<ActiveEventSet>(),
    }
}

/// Remote calendar id paired with a chat user id in the fixtures
pub fn remote_id(user_id: &str) -> String {
    format!("{user_id}_remote")
}

/// All mocks behind one service instance.
pub struct Harness {
    pub users: Arc<MockUserDirectory>,
    pub calendar: Arc<MockCalendarRemote>,
    pub presence: Arc<MockPresencePlatform>,
    pub messenger: Arc<RecordingMessenger>,
    pub service: StatusSyncService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SyncConfig::default())
    }

    pub fn with_config(config: SyncConfig) -> Self {
        let users = Arc::new(MockUserDirectory::default());
        let calendar = Arc::new(MockCalendarRemote::default());
        let presence = Arc::new(MockPresencePlatform::default());
        let messenger = Arc::new(RecordingMessenger::default());

        let service = StatusSyncService::new(
            users.clone(),
            calendar.clone(),
            presence.clone(),
            messenger.clone(),
            config,
        );

        Self { users, calendar, presence, messenger, service }
    }
}
