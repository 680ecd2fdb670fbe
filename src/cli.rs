//! CLI definition and parsing.
//!
//! Notes:
//! - Flags override values loaded from config.xml.
//! - --debug is a shorthand for --log-level debug and wins over it.

use clap::{Parser, ValueHint};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::category::Category;
use crate::config::types::{Config, LogLevel};

/// Release prefixed export files from a staging directory into a publish directory.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Config file to load instead of the default location.
    #[arg(long, short = 'c', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the staging directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub staging_dir: Option<PathBuf>,

    /// Override the publish directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub publish_dir: Option<PathBuf>,

    /// Override the HTTP listen address, e.g. 0.0.0.0:8080.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file (never overwrites) and exit.
    #[arg(long, conflicts_with = "print_config")]
    pub init_config: bool,

    /// Run one export for CATEGORY, print the JSON result and exit.
    #[arg(long, value_name = "CATEGORY")]
    pub once: Option<Category>,

    /// Serve the HTTP trigger only; do not register cron jobs.
    #[arg(long, conflicts_with = "once")]
    pub no_schedule: bool,
}

impl Args {
    /// Precedence: --debug > --log-level > None (keep config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config in place. Unset flags are no-ops.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.staging_dir {
            cfg.staging_dir = p.clone();
        }
        if let Some(p) = &self.publish_dir {
            cfg.publish_dir = p.clone();
        }
        if let Some(addr) = self.bind {
            cfg.bind_addr = addr;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.json {
            cfg.json_logs = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
