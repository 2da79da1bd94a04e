//! Remote calendar event types
//!
//! Events are transient: they are fetched every cycle and only their
//! [`EventHash`] outlives the cycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StatusSyncError};

/// Provider availability marker attached to an event ("show as")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShowAs {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Wall-clock time as reported by the provider, with its IANA zone name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: NaiveDateTime,
    pub time_zone: String,
}

impl EventDateTime {
    /// Wrap a UTC instant.
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self { date_time: instant.naive_utc(), time_zone: "UTC".to_string() }
    }

    /// Normalize to UTC.
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earlier instant.
    /// Local times skipped by a DST transition are rejected.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let tz = Tz::from_str(self.time_zone.trim()).map_err(|_| {
            StatusSyncError::InvalidInput(format!("unknown time zone: {}", self.time_zone))
        })?;

        self.date_time
            .and_local_timezone(tz)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                StatusSyncError::InvalidInput(format!(
                    "local time {} does not exist in {}",
                    self.date_time, self.time_zone
                ))
            })
    }
}

/// Calendar event as returned by the remote busy-view query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEvent {
    /// Provider event id
    pub id: String,
    pub subject: Option<String>,
    pub start: EventDateTime,
    pub end: Option<EventDateTime>,
    #[serde(default)]
    pub show_as: ShowAs,
}

/// Identity of an event across sync cycles: provider id plus start instant
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventHash(String);

impl EventHash {
    /// Wrap an already rendered hash, e.g. one loaded from storage.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EventHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Classifier output for a single event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub hash: EventHash,
    pub busy: bool,
    pub start: DateTime<Utc>,
    pub subject: Option<String>,
}

impl ClassifiedEvent {
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            hash: self.hash.clone(),
            subject: self.subject.clone(),
            start: self.start,
        }
    }
}

/// The part of an event shown to a user when asking for confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub hash: EventHash,
    pub subject: Option<String>,
    pub start: DateTime<Utc>,
}

/// Half-open query window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `lookahead` starting at `now`.
    pub fn starting_at(now: DateTime<Utc>, lookahead: Duration) -> Self {
        Self { start: now, end: now + lookahead }
    }
}
