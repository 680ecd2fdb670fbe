//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, Schedules};
pub use validate::validate_cron_expression;
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EXPORT_MOVER_CONFIG";

pub const STAGING_DIR_DEFAULT: &str = "/var/lib/export_mover/tmp";
pub const PUBLISH_DIR_DEFAULT: &str = "/var/lib/export_mover/export";
pub const BIND_ADDR_DEFAULT: &str = "127.0.0.1:8080";
/// Every five minutes, on the minute (seconds-first cron syntax).
pub const CRON_DEFAULT: &str = "0 */5 * * * *";
