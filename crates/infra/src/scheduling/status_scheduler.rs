//! Status sync scheduler for periodic sync cycles.
//!
//! Provides a cron-based scheduler that triggers one sync cycle per tick.
//! Join handles are tracked, cancellation is explicit, and every
//! asynchronous operation is wrapped in a timeout. A tick that fires while
//! the previous cycle is still running is skipped, never overlapped.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use statussync_core::StatusSyncService;
//! use statussync_domain::SchedulerConfig;
//! use statussync_infra::observability::SyncMetrics;
//! use statussync_infra::scheduling::{SchedulerResult, StatusSyncScheduler};
//!
//! # async fn example(service: Arc<StatusSyncService>) -> SchedulerResult<()> {
//! let metrics = Arc::new(SyncMetrics::new());
//! let mut scheduler =
//!     StatusSyncScheduler::new(SchedulerConfig::default(), service, metrics);
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use statussync_core::{StatusSyncService, SyncReport};
use statussync_domain::{Result, SchedulerConfig, StatusSyncError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::observability::SyncMetrics;
use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// One unit of scheduled work: a full sync cycle.
#[async_trait]
pub trait SyncJob: Send + Sync {
    async fn run_cycle(&self) -> Result<SyncReport>;
}

#[async_trait]
impl SyncJob for StatusSyncService {
    async fn run_cycle(&self) -> Result<SyncReport> {
        self.sync_all().await
    }
}

/// What happened to one triggered cycle
#[derive(Debug)]
pub enum CycleOutcome {
    Completed(SyncReport),
    Failed(StatusSyncError),
    TimedOut,
    /// The previous cycle was still running.
    Skipped,
}

/// Cron-driven sync scheduler with explicit lifecycle management.
pub struct StatusSyncScheduler {
    scheduler: Option<JobScheduler>,
    config: SchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    metrics: Arc<SyncMetrics>,
    job: Arc<dyn SyncJob>,
    cycle_guard: Arc<Mutex<()>>,
}

impl StatusSyncScheduler {
    pub fn new(config: SchedulerConfig, job: Arc<dyn SyncJob>, metrics: Arc<SyncMetrics>) -> Self {
        Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            metrics,
            job,
            cycle_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = secs(self.config.start_timeout_seconds);

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            Self::monitor_task(cancel).await;
        });

        self.monitor_handle = Some(handle);
        info!(cron = %self.config.cron_expression, "Status sync scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    ///
    /// A cycle already in flight is not interrupted; whatever it applied stays.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let Some(mut scheduler) = self.scheduler.take() else {
            return Err(SchedulerError::NotRunning);
        };

        let stop_timeout = secs(self.config.stop_timeout_seconds);
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = secs(self.config.join_timeout_seconds);
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("Status sync scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Run one cycle immediately, outside the cron schedule.
    ///
    /// Shares the overlap guard with scheduled ticks.
    pub async fn run_now(&self) -> CycleOutcome {
        Self::execute_cycle(
            self.job.clone(),
            self.cycle_guard.clone(),
            self.metrics.clone(),
            secs(self.config.job_timeout_seconds),
        )
        .await
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let job = self.job.clone();
        let guard = self.cycle_guard.clone();
        let metrics = self.metrics.clone();
        let job_timeout = secs(self.config.job_timeout_seconds);

        let job_definition = Job::new_async(self.config.cron_expression.as_str(), move |_id, _lock| {
            let job = job.clone();
            let guard = guard.clone();
            let metrics = metrics.clone();

            Box::pin(async move {
                Self::execute_cycle(job, guard, metrics, job_timeout).await;
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered status sync job");
        Ok(scheduler)
    }

    async fn execute_cycle(
        job: Arc<dyn SyncJob>,
        guard: Arc<Mutex<()>>,
        metrics: Arc<SyncMetrics>,
        job_timeout: Duration,
    ) -> CycleOutcome {
        let Ok(_running) = guard.try_lock() else {
            metrics.record_cycle_skipped();
            warn!("Previous sync cycle still running, skipping this tick");
            return CycleOutcome::Skipped;
        };

        metrics.record_cycle_started();
        let started = Instant::now();

        match tokio::time::timeout(job_timeout, job.run_cycle()).await {
            Ok(Ok(report)) => {
                metrics.record_cycle_completed(&report, started.elapsed());
                debug!(elapsed_ms = started.elapsed().as_millis(), "Sync cycle finished");
                CycleOutcome::Completed(report)
            }
            Ok(Err(err)) => {
                metrics.record_cycle_failed(started.elapsed());
                error!(error = %err, "Sync cycle aborted");
                CycleOutcome::Failed(err)
            }
            Err(elapsed) => {
                metrics.record_cycle_timeout();
                warn!(timeout_secs = job_timeout.as_secs(), "Sync cycle timed out");
                debug!(elapsed = ?elapsed, "Timeout details");
                CycleOutcome::TimedOut
            }
        }
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Status sync scheduler monitor cancelled");
    }
}

fn secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

impl Drop for StatusSyncScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("StatusSyncScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
