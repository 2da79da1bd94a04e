//! Availability decisions

pub mod engine;

pub use engine::decide;
