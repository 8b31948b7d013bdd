pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod releaser;
pub(crate) mod sync;

use scene_vault_archive::ZipArchiver;
use scene_vault_db::SqliteStore;
use scene_vault_demozoo::{DemozooClient, HttpFetcher};
use scene_vault_sync::{Reconciler, Settings, SyncOptions};

use crate::CliError;

pub(crate) type LiveReconciler = Reconciler<SqliteStore, DemozooClient, HttpFetcher, ZipArchiver>;

/// Open the catalog database, refusing to create one implicitly.
pub(crate) fn open_store(settings: &Settings) -> Result<SqliteStore, CliError> {
    let path = &settings.database;
    if !path.exists() {
        return Err(CliError::database(format!(
            "No catalog database at {} (run 'scene-vault init' to create one)",
            path.display()
        )));
    }
    let conn = scene_vault_db::open_database(path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {e}")))?;
    Ok(SqliteStore::new(conn))
}

/// Wire the live store, metadata client, downloader, and archiver together.
pub(crate) fn build_reconciler(
    settings: &Settings,
    options: SyncOptions,
) -> Result<LiveReconciler, CliError> {
    let store = open_store(settings)?;
    let source = DemozooClient::new(
        settings.api_base.as_str(),
        &settings.user_agent,
        settings.request_timeout(),
    )
    .map_err(scene_vault_sync::SyncError::from)?;
    let fetcher = HttpFetcher::new(
        &settings.user_agent,
        settings.request_timeout(),
        settings.download_timeout(),
    )
    .map_err(scene_vault_sync::SyncError::from)?;
    Ok(Reconciler::new(
        settings.sync_config(options),
        store,
        source,
        fetcher,
        ZipArchiver,
    ))
}
