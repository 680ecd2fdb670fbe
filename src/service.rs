//! Export runs shared by the on-demand and scheduled triggers.
//!
//! The discovery → relocation chain is synchronous; async callers go through
//! `export`/`export_scheduled`, which hop onto the blocking pool and hold the
//! category's lock for the duration of the run. Two runs of the same category
//! never overlap inside one process; different categories run in parallel.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{Instrument, Span, debug, info};

use crate::category::Category;
use crate::config::Config;
use crate::context::OperationContext;
use crate::errors::{ExportError, FileSystemError};
use crate::fs_ops::{list_by_prefix, move_all};
use crate::model::OperationResult;

/// Outcome of a scheduled firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledRun {
    /// Another run of the same category still held the lock.
    Busy,
    /// Discovery found nothing; the publish directory was left alone.
    NothingStaged,
    Relocated(OperationResult),
}

#[derive(Debug)]
pub struct ExportService {
    staging_dir: PathBuf,
    publish_dir: PathBuf,
    locks: [Arc<Mutex<()>>; Category::COUNT],
}

impl ExportService {
    pub fn new(staging_dir: impl Into<PathBuf>, publish_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            publish_dir: publish_dir.into(),
            locks: std::array::from_fn(|_| Arc::new(Mutex::new(()))),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.staging_dir, &cfg.publish_dir)
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn publish_dir(&self) -> &Path {
        &self.publish_dir
    }

    fn lock_for(&self, category: Category) -> &Arc<Mutex<()>> {
        &self.locks[category as usize]
    }

    /// Staged files for `category`.
    pub fn discover(&self, category: Category) -> Result<Vec<PathBuf>, FileSystemError> {
        list_by_prefix(&self.staging_dir, category.prefix())
    }

    /// Move `files` into the publish directory.
    pub fn relocate(&self, files: &[PathBuf]) -> Result<OperationResult, FileSystemError> {
        move_all(files, &self.publish_dir)
    }

    /// Discovery then relocation on the current thread. Takes no lock.
    pub fn run_blocking(&self, category: Category) -> Result<OperationResult, FileSystemError> {
        let files = self.discover(category)?;
        self.relocate(&files)
    }

    /// On-demand run: waits for the category to be free, then always relocates
    /// (an empty discovery still guarantees the publish directory exists).
    pub async fn export(
        self: &Arc<Self>,
        category: Category,
        ctx: &OperationContext,
    ) -> Result<OperationResult, ExportError> {
        self.export_locked(category).instrument(ctx.span()).await
    }

    /// Scheduled run: skips when the category is busy and does not touch the
    /// publish directory when nothing is staged.
    pub async fn export_scheduled(
        self: &Arc<Self>,
        category: Category,
        ctx: &OperationContext,
    ) -> Result<ScheduledRun, ExportError> {
        self.export_if_idle(category).instrument(ctx.span()).await
    }

    async fn export_locked(self: &Arc<Self>, category: Category) -> Result<OperationResult, ExportError> {
        let guard = Arc::clone(self.lock_for(category)).lock_owned().await;
        info!("export started");
        let svc = Arc::clone(self);
        let span = Span::current();
        // The guard travels with the blocking work: dropping this future
        // must not free the category while files are still moving.
        let result = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            span.in_scope(|| svc.run_blocking(category))
        })
        .await??;
        info!(
            successful = result.success_count(),
            errors = result.error_count(),
            "export completed"
        );
        Ok(result)
    }

    /// Span-less body of `export_scheduled`; the caller supplies the span.
    pub(crate) async fn export_if_idle(self: &Arc<Self>, category: Category) -> Result<ScheduledRun, ExportError> {
        let Ok(guard) = Arc::clone(self.lock_for(category)).try_lock_owned() else {
            debug!("previous run still in progress; skipping");
            return Ok(ScheduledRun::Busy);
        };
        let svc = Arc::clone(self);
        let span = Span::current();
        let run = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            span.in_scope(|| -> Result<ScheduledRun, FileSystemError> {
                let files = svc.discover(category)?;
                if files.is_empty() {
                    return Ok(ScheduledRun::NothingStaged);
                }
                svc.relocate(&files).map(ScheduledRun::Relocated)
            })
        })
        .await??;
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn service(td: &assert_fs::TempDir) -> Arc<ExportService> {
        Arc::new(ExportService::new(td.path().join("tmp"), td.path().join("export")))
    }

    #[tokio::test]
    async fn export_moves_only_the_requested_category() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp/redemption_01.txt").write_str("r1").unwrap();
        td.child("tmp/redemption_02.txt").write_str("r2").unwrap();
        td.child("tmp/outpay_01.txt").write_str("o1").unwrap();
        let svc = service(&td);

        let ctx = OperationContext::new("manual_file_export").for_category(Category::Redemption);
        let result = svc.export(Category::Redemption, &ctx).await.unwrap();

        let mut moved = result.successful_files().to_vec();
        moved.sort();
        assert_eq!(moved, ["redemption_01.txt", "redemption_02.txt"]);
        assert!(td.child("export/redemption_01.txt").path().exists());
        assert!(td.child("tmp/outpay_01.txt").path().exists());
        assert!(!td.child("export/outpay_01.txt").path().exists());
    }

    #[tokio::test]
    async fn on_demand_export_with_nothing_staged_still_creates_publish_dir() {
        let td = assert_fs::TempDir::new().unwrap();
        let svc = service(&td);
        let ctx = OperationContext::new("manual_file_export");
        let result = svc.export(Category::Outpay, &ctx).await.unwrap();
        assert_eq!(result.attempts(), 0);
        assert!(td.child("export").path().is_dir());
    }

    #[tokio::test]
    async fn scheduled_run_with_nothing_staged_leaves_publish_dir_alone() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp").create_dir_all().unwrap();
        let svc = service(&td);
        let ctx = OperationContext::new("EXPORT_OUTPAY");
        let run = svc.export_scheduled(Category::Outpay, &ctx).await.unwrap();
        assert_eq!(run, ScheduledRun::NothingStaged);
        assert!(!td.child("export").path().exists());
    }

    #[tokio::test]
    async fn scheduled_run_skips_when_category_is_busy() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp/outpay_01.txt").touch().unwrap();
        let svc = service(&td);

        let held = svc.lock_for(Category::Outpay).lock().await;
        let ctx = OperationContext::new("EXPORT_OUTPAY");
        let run = svc.export_scheduled(Category::Outpay, &ctx).await.unwrap();
        assert_eq!(run, ScheduledRun::Busy);
        assert!(td.child("tmp/outpay_01.txt").path().exists());

        // Other categories are not blocked.
        let other = svc
            .export_scheduled(Category::Redemption, &OperationContext::new("EXPORT_REDEMPTION"))
            .await
            .unwrap();
        assert_eq!(other, ScheduledRun::NothingStaged);
        drop(held);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancelled_export_keeps_category_locked_until_files_are_moved() {
        let td = assert_fs::TempDir::new().unwrap();
        let total = 2000;
        for i in 0..total {
            td.child(format!("tmp/outpay_{i:05}.txt")).touch().unwrap();
        }
        let svc = service(&td);

        let running = {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.export(Category::Outpay, &OperationContext::new("manual_file_export"))
                    .await
            })
        };
        // Wait until the on-demand run owns the category, then cancel it
        // the way a dropped HTTP connection would.
        while svc.lock_for(Category::Outpay).try_lock().is_ok() && !running.is_finished() {
            tokio::task::yield_now().await;
        }
        running.abort();
        let _ = running.await;

        // The cancelled run still holds the category until its files are
        // moved, so the scheduled run never overlaps it.
        let ctx = OperationContext::new("EXPORT_OUTPAY");
        let outcome = loop {
            match svc.export_scheduled(Category::Outpay, &ctx).await.unwrap() {
                ScheduledRun::Busy => tokio::time::sleep(std::time::Duration::from_millis(5)).await,
                other => break other,
            }
        };
        assert_eq!(outcome, ScheduledRun::NothingStaged);
        assert_eq!(std::fs::read_dir(td.child("export").path()).unwrap().count(), total);
    }

    #[tokio::test]
    async fn staging_path_that_is_a_file_surfaces_as_export_error() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp").touch().unwrap();
        let svc = service(&td);
        let err = svc
            .export(Category::Outpay, &OperationContext::new("manual_file_export"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::FileSystem(FileSystemError::StagingNotDirectory { .. })
        ));
    }
}
