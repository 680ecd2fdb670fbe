//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; path checks happen in validate.rs.
//! - Unknown XML fields are rejected so typos surface at startup.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{BIND_ADDR_DEFAULT, CRON_DEFAULT, PUBLISH_DIR_DEFAULT, STAGING_DIR_DEFAULT};
use crate::category::Category;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    staging_dir: Option<String>,
    publish_dir: Option<String>,
    bind_addr: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    json_logs: Option<bool>,
    schedules: Option<XmlSchedules>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlSchedules {
    redemption: Option<String>,
    outpay: Option<String>,
    own_and_ben: Option<String>,
}

// Tolerate surrounding whitespace in boolean elements.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected true or false, got '{s}'"))),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Map XmlConfig -> Config, keeping defaults for anything left out.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.staging_dir) {
        cfg.staging_dir = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.publish_dir) {
        cfg.publish_dir = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.bind_addr) {
        cfg.bind_addr = s
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind_addr '{s}'"))?;
    }
    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);
    cfg.json_logs = parsed.json_logs.unwrap_or(false);

    // Absent or empty keeps the default; `off` disables the category.
    if let Some(s) = parsed.schedules {
        let entries = [
            (Category::Redemption, s.redemption),
            (Category::Outpay, s.outpay),
            (Category::OwnAndBen, s.own_and_ben),
        ];
        for (category, expr) in entries {
            if let Some(expr) = non_empty(expr) {
                cfg.schedules.set(category, expr);
            }
        }
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the effective file config.
///
/// - An explicit path (CLI `--config`) must exist.
/// - Otherwise `$EXPORT_MOVER_CONFIG` or the OS default is used when present,
///   and built-in defaults apply when it is missing.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_config_from_xml_path(p);
    }
    match default_config_path() {
        Some(p) if p.exists() => {
            debug!(path = %p.display(), "loading config");
            load_config_from_xml_path(&p)
        }
        Some(p) if std::env::var_os(super::CONFIG_ENV).is_some() => {
            bail!("config file named by {} does not exist: {}", super::CONFIG_ENV, p.display())
        }
        _ => Ok(Config::default()),
    }
}

/// Write a commented template config to `path`. Never overwrites.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/export_mover.log".into());

    let content = format!(
        "<!--\n  export_mover configuration (XML)\n\n    staging_dir   -> directory where export files land\n    publish_dir   -> directory files are released into (created on demand)\n    bind_addr     -> HTTP listen address for POST /v1/api/export/<category>\n    log_level     -> quiet | normal | info | debug\n    log_file      -> optional log file, e.g. {}\n    json_logs     -> true for JSON log lines\n    schedules     -> seconds-first cron per category; `off` disables one\n\n  CLI flags override XML values.\n-->\n<config>\n  <staging_dir>{}</staging_dir>\n  <publish_dir>{}</publish_dir>\n  <bind_addr>{}</bind_addr>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <json_logs>false</json_logs>\n  <schedules>\n    <redemption>{}</redemption>\n    <outpay>{}</outpay>\n    <own_and_ben>{}</own_and_ben>\n  </schedules>\n</config>\n",
        suggested_log,
        STAGING_DIR_DEFAULT,
        PUBLISH_DIR_DEFAULT,
        BIND_ADDR_DEFAULT,
        CRON_DEFAULT,
        CRON_DEFAULT,
        CRON_DEFAULT
    );

    let mut opts = fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts
        .open(path)
        .with_context(|| format!("create config file '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write config file '{}'", path.display()))?;

    info!(path = %path.display(), "created template config");
    Ok(())
}
