//! # StatusSync Domain
//!
//! Business domain types for calendar-driven presence synchronization.
//!
//! This crate contains:
//! - Domain data types (users, remote events, presence, decisions)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other StatusSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
