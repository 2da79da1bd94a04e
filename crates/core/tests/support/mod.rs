//! Shared test helpers for `statussync-core` integration tests.
//!
//! In-memory mocks for every port plus a few fixtures, so the sync tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;
