//! Calendar event classification

pub mod classifier;

pub use classifier::{busy_hashes, classify_event, classify_events, event_hash};
