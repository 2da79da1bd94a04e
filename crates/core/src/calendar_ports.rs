//! Remote calendar port interfaces
//!
//! The calendar client, its OAuth handling and its batching transport are
//! external. The engine only asks for a busy view over a window for many
//! users at once.

use std::collections::HashMap;

use async_trait::async_trait;
use statussync_domain::{RemoteEvent, Result, TimeWindow, UserRef};

/// Per-user results of one batched query, keyed by remote user id.
///
/// A sub-query failure for one user is an `Err` entry, not a failed batch.
pub type BusyViewBatch = HashMap<String, Result<Vec<RemoteEvent>>>;

/// Trait for batched calendar reads
#[async_trait]
pub trait CalendarRemote: Send + Sync {
    /// Fetch events overlapping `window` for every user in one batch.
    ///
    /// An outer `Err` means the whole batch failed in transport.
    async fn batch_view_busy(&self, users: &[UserRef], window: TimeWindow)
        -> Result<BusyViewBatch>;
}
