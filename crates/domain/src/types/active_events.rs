//! Active-event set
//!
//! The durable record of which events a user is currently inside. It is
//! loaded and stored as a whole; an empty set and an unset value mean the same
//! thing. Backed by a `BTreeSet` so iteration order, equality and the
//! persisted form are deterministic and duplicates cannot exist.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::event::EventHash;

/// Ordered, duplicate-free set of event identity hashes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveEventSet(BTreeSet<EventHash>);

impl ActiveEventSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, hash: &EventHash) -> bool {
        self.0.contains(hash)
    }

    /// Returns `false` when the hash was already present.
    pub fn insert(&mut self, hash: EventHash) -> bool {
        self.0.insert(hash)
    }
}

impl FromIterator<EventHash> for ActiveEventSet {
    fn from_iter<I: IntoIterator<Item = EventHash>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let set: ActiveEventSet = ["a 1", "a 1", "b 2"].into_iter().map(EventHash::from).collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&EventHash::from("a 1")));
        assert!(set.contains(&EventHash::from("b 2")));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let forward: ActiveEventSet = ["x", "y"].into_iter().map(EventHash::from).collect();
        let backward: ActiveEventSet = ["y", "x"].into_iter().map(EventHash::from).collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn persisted_form_is_a_plain_array() {
        let set: ActiveEventSet = std::iter::once(EventHash::from("evt 2024-10-24T09:00:00Z")).collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["evt 2024-10-24T09:00:00Z"]"#);
        assert_eq!(serde_json::from_str::<ActiveEventSet>("[]").unwrap(), ActiveEventSet::new());
    }
}
