//! Presence platform boundary

pub mod ports;

pub use ports::PresencePlatform;
