//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, validates
//! paths, then runs a single pass (`--once`) or the watch loop until interrupted.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use download_sorter::cli::Args;
use download_sorter::config::{load_or_init, LoadResult, CONFIG_ENV};
use download_sorter::output as out;
use download_sorter::{
    default_config_path, load_config_from_xml_path, shutdown, validate_and_normalize, Config,
    Sorter, SorterError, WatchLoop,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    // Config file first (before logging init); CLI flags override it.
    let (mut cfg, cfg_path) = match &args.config {
        Some(path) => (load_config_from_xml_path(path)?, path.clone()),
        None => match load_or_init()? {
            LoadResult::Loaded(cfg, path) => (*cfg, path),
            LoadResult::CreatedTemplate(path) => {
                out::print_success(&format!(
                    "A template download_sorter config was written to: {}",
                    path.display()
                ));
                out::print_info(
                    "Edit the folders in it (they must exist), then re-run. To use a different file pass --config or set DOWNLOAD_SORTER_CONFIG.",
                );
                return Ok(());
            }
        },
    };
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard is dropped on interrupt so buffered file logs are flushed.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            if shutdown::is_requested() {
                // Second interrupt: stop waiting for the pass to finish.
                if let Ok(mut g) = guard_slot.lock() {
                    let _ = g.take();
                }
                std::process::exit(i32::from(SorterError::Interrupted.code()));
            }
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current pass and shutting down...");
        })
        .context("install signal handler")?;
    }

    debug!("Starting download_sorter: {:?}", args);
    info!("Using config {}", cfg_path.display());

    let result = run_sorter(&mut cfg, args.once);

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_sorter(cfg: &mut Config, once: bool) -> Result<()> {
    validate_and_normalize(cfg)?;
    let sorter = Sorter::new(cfg);

    if once {
        let report = sorter.run_pass();
        out::print_info(&format!(
            "Scanned {} entries: {} moved, {} left in place, {} failed",
            report.scanned, report.moved, report.unmatched, report.failed
        ));
        return Ok(());
    }

    let mut watch = match WatchLoop::subscribe(sorter) {
        Ok(w) => match &cfg.log_file {
            Some(log) => w.ignore_path(log),
            None => w,
        },
        Err(e) => {
            match e.downcast_ref::<SorterError>() {
                Some(se) => error!(code = se.code(), kind = se.kind(), error = %se, "Failed to start watching"),
                None => error!(error = ?e, "Failed to start watching"),
            }
            return Err(e);
        }
    };

    let totals = watch.run();
    info!(
        passes = watch.passes(),
        moved = totals.moved,
        failed = totals.failed,
        "Stopped watching"
    );
    Ok(())
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if let Some(v) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            v.to_string_lossy()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or pass --config."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default download_sorter config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run without --print-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}
