use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use scene_vault_sync::{Settings, SyncOptions};

use super::build_reconciler;
use crate::CliError;

/// Show a releaser's productions and which of them the catalog links.
pub(crate) fn run_releaser(settings: &Settings, id: u64) -> Result<(), CliError> {
    let reconciler = build_reconciler(settings, SyncOptions::default())?;
    let entries = reconciler.releaser_report(id)?;

    log::info!(
        "{}",
        format!("Releaser {id}").if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if entries.is_empty() {
        log::info!("  No productions listed");
        return Ok(());
    }

    for entry in &entries {
        let date = entry.release_date.as_deref().unwrap_or("????-??-??");
        let platform = entry.platform.unwrap_or("-");
        if entry.is_linked() {
            let ids: Vec<String> = entry.records.iter().map(|r| format!("#{r}")).collect();
            log::info!(
                "  {} {:>7}  {:<10}  {:<8}  {}  {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                entry.production_id,
                date,
                platform,
                entry.title,
                ids.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!(
                "  {} {:>7}  {:<10}  {:<8}  {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                entry.production_id,
                date,
                platform,
                entry.title,
            );
        }
    }

    let linked = entries.iter().filter(|e| e.is_linked()).count();
    crate::log_blank();
    log::info!(
        "  {} of {} productions linked",
        linked,
        entries.len()
    );
    Ok(())
}
