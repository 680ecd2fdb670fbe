//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - Schedules holds one cron expression per category.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use super::{BIND_ADDR_DEFAULT, CRON_DEFAULT, PUBLISH_DIR_DEFAULT, STAGING_DIR_DEFAULT};
use crate::category::Category;

/// Verbosity accepted in config.xml and on the command line.
/// Each step maps onto one tracing level (quiet = error ... debug = trace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    /// Run summaries and per-file moves.
    #[default]
    Normal,
    Info,
    Debug,
}

impl LogLevel {
    /// Case-insensitive; a few aliases are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Cron expression per category. An empty expression or `off` disables
/// scheduling for that category; the on-demand trigger still works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedules {
    pub redemption: String,
    pub outpay: String,
    pub own_and_ben: String,
}

impl Default for Schedules {
    fn default() -> Self {
        Self {
            redemption: CRON_DEFAULT.to_string(),
            outpay: CRON_DEFAULT.to_string(),
            own_and_ben: CRON_DEFAULT.to_string(),
        }
    }
}

impl Schedules {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Redemption => &self.redemption,
            Category::Outpay => &self.outpay,
            Category::OwnAndBen => &self.own_and_ben,
        }
    }

    pub fn set(&mut self, category: Category, expr: impl Into<String>) {
        let slot = match category {
            Category::Redemption => &mut self.redemption,
            Category::Outpay => &mut self.outpay,
            Category::OwnAndBen => &mut self.own_and_ben,
        };
        *slot = expr.into();
    }

    /// Categories with a non-empty expression, paired with it.
    pub fn enabled(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.get(c).trim()))
            .filter(|(_, expr)| !expr.is_empty() && !expr.eq_ignore_ascii_case("off"))
    }
}

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Landing zone where export files appear
    pub staging_dir: PathBuf,
    /// Released files end up here
    pub publish_dir: PathBuf,
    pub schedules: Schedules,
    /// HTTP listen address for the on-demand trigger
    pub bind_addr: SocketAddr,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Emit JSON log lines instead of compact text
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from(STAGING_DIR_DEFAULT),
            publish_dir: PathBuf::from(PUBLISH_DIR_DEFAULT),
            schedules: Schedules::default(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: LogLevel::Normal,
            log_file: None,
            json_logs: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(staging_dir: impl Into<PathBuf>, publish_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            publish_dir: publish_dir.into(),
            ..Default::default()
        }
    }
}
