//! Core library for `export_mover`.
//!
//! Staged export files are released from a staging directory into a publish
//! directory, one category (file-name prefix) at a time. A run is triggered
//! over HTTP or by a per-category cron schedule; both go through
//! [`ExportService`].

pub mod category;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod fs_ops;
pub mod http;
pub mod model;
pub mod output;
pub mod scheduler;
pub mod service;

pub use category::Category;
pub use config::{
    CONFIG_ENV, Config, LogLevel, Schedules, create_template_config, default_config_path, load_config,
    load_config_from_xml_path, path_has_symlink_ancestor,
};
pub use context::OperationContext;
pub use errors::{ExportError, FileSystemError};
pub use fs_ops::{list_by_prefix, move_all};
pub use model::{FileFailure, OperationResult};
pub use scheduler::{Scheduler, run_scheduled};
pub use service::{ExportService, ScheduledRun};
