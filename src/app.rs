//! Application orchestrator.
//! Loads and merges config, initializes logging, validates, then either runs a
//! single export (`--once`) or serves the HTTP trigger alongside the cron jobs.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use export_mover::cli::Args;
use export_mover::http::{self, ExportResponse};
use export_mover::output as out;
use export_mover::{
    CONFIG_ENV, Category, Config, ExportService, OperationContext, Scheduler, create_template_config,
    default_config_path, load_config,
};

use crate::logging::init_tracing;

pub async fn run(args: Args) -> Result<()> {
    if args.print_config {
        return print_config_location(&args);
    }
    if args.init_config {
        return init_config(&args);
    }

    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), cfg.json_logs).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e:#}"));
    })?;
    debug!(?args, "starting {}", env!("CARGO_PKG_NAME"));

    cfg.validate()?;
    let service = Arc::new(ExportService::from_config(&cfg));

    match args.once {
        Some(category) => run_once(&service, category).await,
        None => serve(service, &cfg, !args.no_schedule).await,
    }
}

fn config_target(args: &Args) -> Result<std::path::PathBuf> {
    match &args.config {
        Some(p) => Ok(p.clone()),
        None => default_config_path().context("could not determine a default config path"),
    }
}

fn print_config_location(args: &Args) -> Result<()> {
    let path = config_target(args)?;
    let source = if args.config.is_some() {
        "--config"
    } else if std::env::var_os(CONFIG_ENV).is_some() {
        CONFIG_ENV
    } else {
        "default location"
    };
    out::print_info(&format!("Config file ({source}):\n  {}", path.display()));
    if path.exists() {
        out::print_info("A config file exists at that location.");
    } else {
        out::print_info("No config file there yet; built-in defaults apply. Use --init-config to write a template.");
    }
    Ok(())
}

fn init_config(args: &Args) -> Result<()> {
    let path = config_target(args)?;
    create_template_config(&path)?;
    out::print_success(&format!("Template config written to: {}", path.display()));
    out::print_info("Edit staging_dir, publish_dir and the schedules, then start the service.");
    Ok(())
}

/// One synchronous export; prints the payload the HTTP trigger would return.
async fn run_once(service: &Arc<ExportService>, category: Category) -> Result<()> {
    let ctx = OperationContext::new("manual_file_export").for_category(category);
    match service.export(category, &ctx).await {
        Ok(result) => {
            let failed = result.error_count();
            out::print_json(&ExportResponse::from_result(category, result))?;
            if failed > 0 {
                out::print_warn(&format!("{failed} file(s) could not be moved"));
            }
            Ok(())
        }
        Err(e) => {
            out::print_json(&ExportResponse::from_export_error(category, &e))?;
            bail!("export of {} failed: {e}", category.slug())
        }
    }
}

async fn serve(service: Arc<ExportService>, cfg: &Config, with_schedule: bool) -> Result<()> {
    let scheduler = if with_schedule {
        Some(Scheduler::start(Arc::clone(&service), &cfg.schedules).await?)
    } else {
        info!("cron jobs disabled; serving on-demand trigger only");
        None
    };

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("bind {}", cfg.bind_addr))?;
    let served = http::serve(listener, http::router(service), shutdown_signal()).await;

    if let Some(s) = scheduler {
        s.shutdown().await?;
    }
    info!("shut down");
    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => out::print_warn("Received interrupt; shutting down gracefully..."),
        // Without a signal handler the server runs until killed.
        Err(e) => {
            out::print_error(&format!("could not listen for Ctrl-C: {e}"));
            std::future::pending::<()>().await
        }
    }
}
