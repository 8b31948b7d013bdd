use std::sync::atomic::Ordering;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use scene_vault_sync::{ReconcileStat, ScanMode, Settings, SingleOutcome, SyncOptions, parse_key};

use super::{LiveReconciler, build_reconciler};
use crate::CliError;
use crate::cli_types::WriteArgs;
use crate::status::reporter;

fn options(write: WriteArgs) -> SyncOptions {
    SyncOptions {
        overwrite: write.overwrite,
        dry_run: write.dry_run,
    }
}

/// Stop the batch after the current record on Ctrl+C.
fn install_cancel(reconciler: &LiveReconciler) {
    let cancel = reconciler.cancel_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        cancel.store(true, Ordering::SeqCst);
    }) {
        log::warn!("Could not install Ctrl+C handler: {e}");
    }
}

fn dry_run_banner(dry_run: bool) {
    if dry_run {
        log::info!(
            "{}",
            "--- DRY RUN: no records will be changed except gone productions ---"
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}

/// Reconcile a single record by id or uuid.
pub(crate) fn run_sync(
    settings: &Settings,
    key: &str,
    write: WriteArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let reconciler = build_reconciler(settings, options(write))?;
    dry_run_banner(write.dry_run);

    let progress = reporter(quiet);
    let result = reconciler.reconcile_one(&key, progress.as_ref());
    drop(progress);

    match result? {
        SingleOutcome::NotLinked => log::info!(
            "Record {} has no Demozoo production linked; nothing to do",
            key
        ),
        SingleOutcome::NothingToDo => log::info!(
            "Record {} is {}",
            key,
            "up to date".if_supports_color(Stdout, |t| t.green()),
        ),
        // Already reported by the progress observer.
        _ => {}
    }
    Ok(())
}

/// Reconcile linked records in bulk.
pub(crate) fn run_sync_all(
    settings: &Settings,
    all: bool,
    force: bool,
    write: WriteArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let mode = if force {
        ScanMode::ForceDownload
    } else if all {
        ScanMode::AllLinked
    } else {
        ScanMode::Incomplete
    };
    let reconciler = build_reconciler(settings, options(write))?;
    install_cancel(&reconciler);
    dry_run_banner(write.dry_run);

    log::info!(
        "{}",
        "Catalog Reconciliation".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database:  {}", settings.database.display());
    log::info!("  Downloads: {}", settings.downloads.display());
    crate::log_blank();

    let progress = reporter(quiet);
    let stat = reconciler.reconcile_all(mode, progress.as_ref())?;
    drop(progress);
    print_summary(&stat);
    Ok(())
}

/// Re-pull titles, credits, and cross-references.
pub(crate) fn run_refresh(settings: &Settings, dry_run: bool, quiet: bool) -> Result<(), CliError> {
    let reconciler = build_reconciler(
        settings,
        SyncOptions {
            overwrite: false,
            dry_run,
        },
    )?;
    install_cancel(&reconciler);
    dry_run_banner(dry_run);

    log::info!(
        "{}",
        "Authorship Refresh".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let progress = reporter(quiet);
    let stat = reconciler.refresh_authorship(progress.as_ref())?;
    drop(progress);
    print_summary(&stat);
    Ok(())
}

fn print_summary(stat: &ReconcileStat) {
    crate::log_blank();
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Records visited:  {:>6} of {}", stat.count, stat.total);
    log::info!(
        "  Updated:          {:>6}",
        stat.updated.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Unlinked:         {:>6}", stat.unlinked);
    log::info!("  Skipped:          {:>6}", stat.skipped);
    if stat.failed > 0 {
        log::info!(
            "  Failed:           {:>6}",
            stat.failed.if_supports_color(Stdout, |t| t.red()),
        );
    } else {
        log::info!("  Failed:           {:>6}", stat.failed);
    }
    log::info!("  Missing artifacts:{:>6}", stat.missing);
    log::info!("  Elapsed:          {:>5.1}s", stat.elapsed.as_secs_f64());
    if stat.cancelled {
        log::warn!("Run was cancelled before all records were visited");
    }
}
