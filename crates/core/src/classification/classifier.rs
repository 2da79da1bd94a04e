//! Event classifier
//!
//! Pure functions deciding whether a remote event makes its owner busy and
//! computing the identity hash that tracks the event across cycles.

use chrono::{DateTime, SecondsFormat, Utc};
use statussync_domain::constants::EVENT_HASH_SEPARATOR;
use statussync_domain::{ClassifiedEvent, EventHash, RemoteEvent, Result, ShowAs};

/// Identity hash for an event: provider id, a space, and the start instant in
/// RFC 3339 UTC with second precision (`evt 2024-10-24T09:00:00Z`).
///
/// Only the id and start participate, so edits to any other field keep the
/// identity stable while a rescheduled event becomes a new one.
pub fn event_hash(event_id: &str, start: DateTime<Utc>) -> EventHash {
    EventHash::new(format!(
        "{event_id}{EVENT_HASH_SEPARATOR}{}",
        start.to_rfc3339_opts(SecondsFormat::Secs, true)
    ))
}

/// Classify a single event.
///
/// Busy iff the provider marker is `busy`. The end instant is never read, so
/// an unusual end zone cannot fail classification.
///
/// # Errors
/// Returns `StatusSyncError::InvalidInput` when the start time cannot be
/// normalized to UTC.
pub fn classify_event(event: &RemoteEvent) -> Result<ClassifiedEvent> {
    let start = event.start.to_utc()?;

    Ok(ClassifiedEvent {
        hash: event_hash(&event.id, start),
        busy: event.show_as == ShowAs::Busy,
        start,
        subject: event.subject.clone(),
    })
}

/// Classify every event returned for one user.
///
/// Fails as a whole: dropping a single unreadable event could make a tracked
/// meeting look finished and flip presence back to online.
pub fn classify_events(events: &[RemoteEvent]) -> Result<Vec<ClassifiedEvent>> {
    events.iter().map(classify_event).collect()
}

/// Hashes of the busy events, preserving classifier order.
pub fn busy_hashes(classified: &[ClassifiedEvent]) -> Vec<EventHash> {
    classified.iter().filter(|event| event.busy).map(|event| event.hash.clone()).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone};
    use statussync_domain::{EventDateTime, StatusSyncError};

    use super::*;

    fn moment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 24, 9, 0, 0).unwrap()
    }

    fn event(id: &str, show_as: ShowAs) -> RemoteEvent {
        RemoteEvent {
            id: id.to_string(),
            subject: Some("Standup".into()),
            start: EventDateTime::utc(moment()),
            end: Some(EventDateTime::utc(moment() + Duration::minutes(30))),
            show_as,
        }
    }

    #[test]
    fn hash_uses_id_and_rfc3339_start() {
        assert_eq!(event_hash("event_id", moment()).as_str(), "event_id 2024-10-24T09:00:00Z");
    }

    #[test]
    fn hash_drops_subsecond_precision() {
        let precise = moment() + Duration::milliseconds(250);
        assert_eq!(event_hash("e", precise), event_hash("e", moment()));
    }

    #[test]
    fn only_busy_marker_is_busy() {
        for show_as in [ShowAs::Free, ShowAs::Tentative, ShowAs::Oof, ShowAs::WorkingElsewhere, ShowAs::Unknown] {
            let classified = classify_event(&event("e", show_as)).unwrap();
            assert!(!classified.busy, "{show_as:?} must not be busy");
        }
        assert!(classify_event(&event("e", ShowAs::Busy)).unwrap().busy);
    }

    #[test]
    fn hash_ignores_end_and_subject() {
        let original = event("e", ShowAs::Busy);
        let mut edited = original.clone();
        edited.subject = Some("Renamed".into());
        edited.end = Some(EventDateTime::utc(moment() + Duration::hours(2)));

        let a = classify_event(&original).unwrap();
        let b = classify_event(&edited).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn same_instant_in_different_zones_hashes_equal() {
        let mut local = event("e", ShowAs::Busy);
        local.start = EventDateTime {
            date_time: NaiveDate::from_ymd_opt(2024, 10, 24).unwrap().and_hms_opt(11, 0, 0).unwrap(),
            time_zone: "Europe/Berlin".into(),
        };

        let utc = classify_event(&event("e", ShowAs::Busy)).unwrap();
        let berlin = classify_event(&local).unwrap();
        assert_eq!(utc.hash, berlin.hash);
    }

    #[test]
    fn busy_event_with_past_end_stays_busy() {
        let mut e = event("e", ShowAs::Busy);
        e.end = Some(EventDateTime::utc(moment() - Duration::hours(1)));
        assert!(classify_event(&e).unwrap().busy);
    }

    #[test]
    fn unparseable_end_zone_is_ignored() {
        let mut e = event("e", ShowAs::Busy);
        e.end = Some(EventDateTime {
            date_time: NaiveDate::from_ymd_opt(2024, 10, 24).unwrap().and_hms_opt(10, 0, 0).unwrap(),
            time_zone: "Pacific Standard Time".into(),
        });

        let classified = classify_event(&e).expect("end zone is not inspected");
        assert!(classified.busy);
        assert_eq!(classified.hash.as_str(), "e 2024-10-24T09:00:00Z");
    }

    #[test]
    fn classification_is_reproducible() {
        let e = event("e", ShowAs::Busy);
        assert_eq!(classify_event(&e).unwrap(), classify_event(&e).unwrap());
    }

    #[test]
    fn one_bad_zone_fails_the_batch() {
        let mut bad = event("bad", ShowAs::Free);
        bad.start.time_zone = "Nowhere/Land".into();

        let result = classify_events(&[event("ok", ShowAs::Busy), bad]);
        assert!(matches!(result, Err(StatusSyncError::InvalidInput(_))));
    }

    #[test]
    fn busy_hashes_filters_in_order() {
        let classified = classify_events(
            &[event("a", ShowAs::Busy), event("b", ShowAs::Free), event("c", ShowAs::Busy)],
        )
        .unwrap();

        let hashes: Vec<_> = busy_hashes(&classified).into_iter().map(EventHash::into_inner).collect();
        assert_eq!(hashes, vec!["a 2024-10-24T09:00:00Z", "c 2024-10-24T09:00:00Z"]);
    }
}
