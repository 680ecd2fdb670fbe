//! Cron-driven trigger: one job per enabled category.
//!
//! Firings never propagate errors; a failed run is logged and the next firing
//! starts from scratch.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{Instrument, debug, error, info, warn};

use crate::category::Category;
use crate::config::Schedules;
use crate::context::OperationContext;
use crate::service::{ExportService, ScheduledRun};

pub struct Scheduler {
    inner: JobScheduler,
}

impl Scheduler {
    /// Register a job per enabled schedule and start ticking.
    pub async fn start(service: Arc<ExportService>, schedules: &Schedules) -> Result<Self> {
        let inner = JobScheduler::new().await.context("create job scheduler")?;

        for (category, expr) in schedules.enabled() {
            let svc = Arc::clone(&service);
            let job = Job::new_async_tz(expr, chrono::Local, move |_id, _sched| {
                let svc = Arc::clone(&svc);
                Box::pin(async move {
                    run_scheduled(&svc, category).await;
                })
            })
            .with_context(|| format!("schedule {} with '{expr}'", category.slug()))?;
            inner
                .add(job)
                .await
                .with_context(|| format!("register job for {}", category.slug()))?;
            info!(category = %category, cron = expr, "scheduled export");
        }

        inner.start().await.context("start job scheduler")?;
        Ok(Self { inner })
    }

    /// Stop firing new jobs. Runs already in flight finish on their own.
    pub async fn shutdown(mut self) -> Result<()> {
        self.inner.shutdown().await.context("stop job scheduler")
    }
}

/// One scheduled firing for `category`. Never fails.
pub async fn run_scheduled(service: &Arc<ExportService>, category: Category) {
    let ctx = OperationContext::new(format!("EXPORT_{}", category.name())).for_category(category);

    async move {
        match service.export_if_idle(category).await {
            Ok(ScheduledRun::Busy) => debug!("category busy; firing skipped"),
            Ok(ScheduledRun::NothingStaged) => info!("No files found"),
            Ok(ScheduledRun::Relocated(result)) => {
                info!(
                    successful = result.success_count(),
                    errors = result.error_count(),
                    "Completed scheduled processing"
                );
                for failure in result.failures() {
                    warn!(
                        file = %failure.file_name,
                        error = %failure.error_message,
                        "Failed to process file"
                    );
                }
            }
            Err(e) => error!(kind = e.kind(), error = %e, "scheduled export failed"),
        }
    }
    .instrument(ctx.span())
    .await
}
