//! Config validation logic.
//! Checks cron syntax and that staging/publish are disjoint. Directories are
//! never created here; the relocator owns that policy at run time.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokio_cron_scheduler::Job;
use tracing::{info, warn};

use super::types::Config;

/// Parse a seconds-first cron expression with the scheduler's own parser.
pub fn validate_cron_expression(expr: &str) -> Result<()> {
    Job::new(expr.trim(), |_id, _sched| {})
        .map(|_| ())
        .with_context(|| format!("invalid cron expression '{expr}'"))
}

impl Config {
    /// Validate schedules and directory layout.
    pub fn validate(&self) -> Result<()> {
        for (category, expr) in self.schedules.enabled() {
            validate_cron_expression(expr)
                .with_context(|| format!("schedule for {}", category.slug()))?;
        }

        let staging = resolve(&self.staging_dir);
        let publish = resolve(&self.publish_dir);
        if staging == publish {
            bail!(
                "staging_dir and publish_dir resolve to the same path: '{}'",
                staging.display()
            );
        }
        if staging.starts_with(&publish) {
            bail!(
                "staging_dir '{}' must not be inside publish_dir '{}'",
                staging.display(),
                publish.display()
            );
        }
        if publish.starts_with(&staging) {
            bail!(
                "publish_dir '{}' must not be inside staging_dir '{}'",
                publish.display(),
                staging.display()
            );
        }

        // Runs report these as typed faults; flag them early as well.
        warn_if_not_dir(&self.staging_dir, "staging_dir");
        warn_if_not_dir(&self.publish_dir, "publish_dir");

        info!(
            staging = %self.staging_dir.display(),
            publish = %self.publish_dir.display(),
            scheduled = self.schedules.enabled().count(),
            "config validated"
        );
        Ok(())
    }
}

/// Canonical form when the path exists, the path as given otherwise.
fn resolve(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn warn_if_not_dir(path: &Path, name: &str) {
    if path.exists() && !path.is_dir() {
        warn!(path = %path.display(), "{name} exists but is not a directory");
    }
}
