//! Tracing initialization.
//!
//! - Verbosity comes from `LogLevel`; RUST_LOG is not consulted.
//! - Stdout gets compact text or JSON; an optional log file gets the same
//!   format through a non-blocking writer.
//! - File logging is refused when any ancestor of the log path is a symlink.

use anyhow::{Result, anyhow};
use chrono::Local;
use export_mover::output as out;
use export_mover::{LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Local timestamp, DD/MM/YY HH:MM:SS.
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn filter_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    }
}

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(ansi)
        .with_writer(writer);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path)
}

/// File layer for `path`, or the reason it was not enabled.
fn file_layer(path: &Path, json: bool) -> Result<(BoxedLayer, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err(format!("an ancestor of {} is a symlink", path.display())),
        Err(e) => return Err(format!("could not inspect {}: {e}", path.display())),
    }
    let file = open_append(path).map_err(|e| format!("could not open {}: {e}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    Ok((fmt_layer(writer, json, false), guard))
}

/// Install the global subscriber. The returned guard flushes the file layer
/// on drop and must live until shutdown.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(io::stdout, json, !json)];
    let mut guard = None;

    if let Some(path) = log_file {
        match file_layer(path, json) {
            Ok((layer, g)) => {
                layers.push(layer);
                guard = Some(g);
            }
            Err(reason) => out::print_warn(&format!(
                "File logging to '{}' was not enabled ({reason}); logging to stdout only.",
                path.display()
            )),
        }
    }

    registry()
        .with(layers)
        .with(EnvFilter::new(filter_directive(lvl)))
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}
