//! Sync cycle metrics
//!
//! ## Design
//! - **SeqCst ordering** for the counters used in derived averages
//! - **Relaxed ordering** for independent counters
//! - **Microsecond storage** for durations, reported in milliseconds

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use serde::Serialize;
use statussync_core::SyncReport;

/// Counters describing scheduled sync cycles
#[derive(Debug, Default)]
pub struct SyncMetrics {
    cycles_started: AtomicUsize,
    cycles_completed: AtomicUsize,
    cycles_failed: AtomicUsize,
    cycles_timed_out: AtomicUsize,
    cycles_skipped: AtomicUsize,
    total_cycle_time_micros: AtomicU64,
    last_cycle_time_micros: AtomicU64,
    presence_updates: AtomicUsize,
    confirmations_requested: AtomicUsize,
    user_failures: AtomicUsize,
}

/// Point-in-time copy of [`SyncMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncMetricsSnapshot {
    pub cycles_started: usize,
    pub cycles_completed: usize,
    pub cycles_failed: usize,
    pub cycles_timed_out: usize,
    pub cycles_skipped: usize,
    pub avg_cycle_time_ms: f64,
    pub last_cycle_time_ms: u64,
    pub presence_updates: usize,
    pub confirmations_requested: usize,
    pub user_failures: usize,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle_started(&self) {
        self.cycles_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cycle that produced a report, including per-user counts.
    pub fn record_cycle_completed(&self, report: &SyncReport, elapsed: Duration) {
        self.record_cycle_time(elapsed);
        self.presence_updates.fetch_add(report.presence_updates(), Ordering::Relaxed);
        self.confirmations_requested.fetch_add(report.confirmations_requested(), Ordering::Relaxed);
        self.user_failures.fetch_add(report.failures.len(), Ordering::Relaxed);
    }

    /// Record a cycle that aborted with an error.
    pub fn record_cycle_failed(&self, elapsed: Duration) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
        self.record_duration(elapsed);
    }

    pub fn record_cycle_timeout(&self) {
        self.cycles_timed_out.fetch_add(1, Ordering::Relaxed);
    }

    /// A trigger fired while the previous cycle was still running.
    pub fn record_cycle_skipped(&self) {
        self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cycle_time(&self, elapsed: Duration) {
        self.cycles_completed.fetch_add(1, Ordering::SeqCst);
        self.record_duration(elapsed);
    }

    fn record_duration(&self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.total_cycle_time_micros.fetch_add(micros, Ordering::SeqCst);
        self.last_cycle_time_micros.store(micros, Ordering::Relaxed);
    }

    /// Average duration of cycles that ran to completion or failed.
    pub fn avg_cycle_time_ms(&self) -> f64 {
        let total = self.total_cycle_time_micros.load(Ordering::SeqCst);
        let count = self.cycles_completed.load(Ordering::SeqCst)
            + self.cycles_failed.load(Ordering::Relaxed);

        if count == 0 {
            return 0.0;
        }

        (total as f64 / count as f64) / 1_000.0
    }

    pub fn snapshot(&self) -> SyncMetricsSnapshot {
        SyncMetricsSnapshot {
            cycles_started: self.cycles_started.load(Ordering::Relaxed),
            cycles_completed: self.cycles_completed.load(Ordering::SeqCst),
            cycles_failed: self.cycles_failed.load(Ordering::Relaxed),
            cycles_timed_out: self.cycles_timed_out.load(Ordering::Relaxed),
            cycles_skipped: self.cycles_skipped.load(Ordering::Relaxed),
            avg_cycle_time_ms: self.avg_cycle_time_ms(),
            last_cycle_time_ms: self.last_cycle_time_micros.load(Ordering::Relaxed) / 1_000,
            presence_updates: self.presence_updates.load(Ordering::Relaxed),
            confirmations_requested: self.confirmations_requested.load(Ordering::Relaxed),
            user_failures: self.user_failures.load(Ordering::Relaxed),
        }
    }
}
