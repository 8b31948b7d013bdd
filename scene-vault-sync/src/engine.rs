//! The per-record reconciliation pipeline and its batch drivers.
//!
//! Every entry point funnels into [`Reconciler::reconcile_record`]:
//!
//! 1. fetch the remote production (gone → clear the link and stop)
//! 2. merge cross-reference id, title, credit rolls and empty tags
//! 3. (backfill pass) download the artifact when it is missing or forced
//! 4. (backfill pass) compute missing digests and listing, re-run the
//!    classifier
//! 5. persist the staged patch with one update
//!
//! A record is either left untouched or written exactly once.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;
use scene_vault_archive::{Archiver, digest_file, join_listing};
use scene_vault_catalog::{
    CatalogRecord, LinkChange, RecordKey, RecordPatch, classify, record_variants, strip_extension,
};
use scene_vault_db::{CatalogStore, ScanFilter, UpdateStatement, build_update};
use scene_vault_demozoo::{ArtifactFetcher, Fetch, ProductionSource, RemoteProduction, fetch_artifact};

use crate::error::SyncError;
use crate::merge;
use crate::progress::SyncProgress;
use crate::releaser::{self, ReleaserEntry};
use crate::stats::{ReconcileStat, RecordOutcome, SingleOutcome};

/// Behaviour switches for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Re-run the classifier and replace stored launcher/readme choices.
    pub overwrite: bool,
    /// Stage and report, but write nothing except gone-production unlinks.
    pub dry_run: bool,
}

/// Everything the engine needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Artifact directory; each record's file is named by its uuid.
    pub downloads: PathBuf,
    pub catalog_host: String,
    pub actor_id: String,
    pub options: SyncOptions,
}

/// Which records a batch visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Linked records with at least one empty artifact field.
    Incomplete,
    /// Every linked record.
    AllLinked,
    /// Every linked record, re-downloading each artifact.
    ForceDownload,
}

/// Which pipeline stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Metadata merge plus artifact download and backfill.
    Backfill { force_download: bool },
    /// Metadata merge only.
    Refresh,
}

impl Pass {
    fn verb(&self) -> &'static str {
        match self {
            Self::Backfill { .. } => "reconcile",
            Self::Refresh => "refresh",
        }
    }
}

pub struct Reconciler<S, P, F, A> {
    config: SyncConfig,
    store: S,
    source: P,
    fetcher: F,
    archiver: A,
    cancel: Arc<AtomicBool>,
}

impl<S, P, F, A> Reconciler<S, P, F, A>
where
    S: CatalogStore,
    P: ProductionSource,
    F: ArtifactFetcher,
    A: Archiver,
{
    pub fn new(config: SyncConfig, store: S, source: P, fetcher: F, archiver: A) -> Self {
        Self {
            config,
            store,
            source,
            fetcher,
            archiver,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Flag checked between records. Setting it stops a batch after the
    /// record in flight has finished.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Reconcile a single record by id or uuid.
    ///
    /// Unlike the batch drivers, a pipeline error is returned to the caller.
    pub fn reconcile_one(
        &self,
        key: &RecordKey,
        progress: &dyn SyncProgress,
    ) -> Result<SingleOutcome, SyncError> {
        let record = self
            .store
            .find(key)?
            .ok_or_else(|| SyncError::RecordNotFound(key.to_string()))?;
        let label = record_label(&record);
        if !record.is_linked() {
            return Ok(SingleOutcome::NotLinked);
        }

        progress.on_record(1, 1, &label);
        let mut stat = ReconcileStat::default();
        let pass = Pass::Backfill {
            force_download: false,
        };
        match self.reconcile_record(&record, pass, progress, &mut stat) {
            Ok(outcome) => {
                progress.on_outcome(&label, &RecordOutcome::Finished(outcome.clone()));
                Ok(outcome)
            }
            Err(e) => {
                progress.on_outcome(&label, &RecordOutcome::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Reconcile every record selected by `mode`.
    pub fn reconcile_all(
        &self,
        mode: ScanMode,
        progress: &dyn SyncProgress,
    ) -> Result<ReconcileStat, SyncError> {
        let (filter, pass) = match mode {
            ScanMode::Incomplete => (
                ScanFilter::Incomplete,
                Pass::Backfill {
                    force_download: false,
                },
            ),
            ScanMode::AllLinked => (
                ScanFilter::Linked,
                Pass::Backfill {
                    force_download: false,
                },
            ),
            ScanMode::ForceDownload => (
                ScanFilter::Linked,
                Pass::Backfill {
                    force_download: true,
                },
            ),
        };
        self.run_batch(filter, pass, progress)
    }

    /// Re-pull title, credits and cross-reference ids for every linked
    /// record, regardless of artifact completeness.
    pub fn refresh_authorship(
        &self,
        progress: &dyn SyncProgress,
    ) -> Result<ReconcileStat, SyncError> {
        self.run_batch(ScanFilter::Linked, Pass::Refresh, progress)
    }

    /// List a releaser's productions with their local link state.
    pub fn releaser_report(&self, releaser_id: u64) -> Result<Vec<ReleaserEntry>, SyncError> {
        releaser::releaser_report(&self.source, &self.store, releaser_id)
    }

    fn run_batch(
        &self,
        filter: ScanFilter,
        pass: Pass,
        progress: &dyn SyncProgress,
    ) -> Result<ReconcileStat, SyncError> {
        let start = Instant::now();
        let records = self.store.scan(filter)?;
        let mut stat = ReconcileStat {
            total: records.len(),
            ..Default::default()
        };
        progress.on_phase(&format!("{} records to {}", stat.total, pass.verb()));

        for (i, record) in records.iter().enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                log::warn!("Cancelled after {} of {} records", stat.count, stat.total);
                stat.cancelled = true;
                break;
            }
            stat.count += 1;
            let label = record_label(record);
            progress.on_record(i + 1, stat.total, &label);

            match self.reconcile_record(record, pass, progress, &mut stat) {
                Ok(outcome) => {
                    log::debug!("{label}: {outcome}");
                    stat.record(&outcome);
                    progress.on_outcome(&label, &RecordOutcome::Finished(outcome));
                }
                Err(e) => {
                    if e.is_store() {
                        log::error!("{label}: {e}");
                    } else {
                        log::warn!("{label}: {e}");
                    }
                    stat.failed += 1;
                    progress.on_outcome(&label, &RecordOutcome::Failed(e.to_string()));
                }
            }
        }

        stat.elapsed = start.elapsed();
        progress.on_complete(&stat.summary());
        Ok(stat)
    }

    /// Run the pipeline for one record.
    pub fn reconcile_record(
        &self,
        record: &CatalogRecord,
        pass: Pass,
        progress: &dyn SyncProgress,
        stat: &mut ReconcileStat,
    ) -> Result<SingleOutcome, SyncError> {
        let Some(production_id) = record.production_id.filter(|id| *id > 0) else {
            return Ok(SingleOutcome::NotLinked);
        };

        let remote = match self.source.production(production_id)? {
            Fetch::Found(remote) => remote,
            Fetch::Gone => return self.unlink(record, production_id),
            Fetch::Unusable(status) => {
                return Ok(SingleOutcome::Skipped(format!(
                    "production {production_id} answered HTTP {status}"
                )));
            }
        };

        let mut patch = RecordPatch::default();
        merge::merge_remote(record, &remote, &mut patch);

        if let Pass::Backfill { force_download } = pass {
            self.refresh_artifact(record, &remote, force_download, progress, stat, &mut patch);
            self.backfill(record, &mut patch)?;
        }

        self.persist(record, &patch)
    }

    /// The remote production was removed: clear the link, even on a dry run.
    fn unlink(&self, record: &CatalogRecord, production_id: u64) -> Result<SingleOutcome, SyncError> {
        log::info!(
            "{}: production {production_id} is gone, unlinking",
            record_label(record)
        );
        let patch = RecordPatch {
            production: LinkChange::Cleared,
            ..Default::default()
        };
        let stmt = build_update(record.id, &patch, Utc::now(), &self.config.actor_id);
        self.store.execute(&stmt)?;
        Ok(SingleOutcome::Unlinked)
    }

    fn artifact_path(&self, record: &CatalogRecord) -> PathBuf {
        self.config.downloads.join(&record.uuid)
    }

    /// Download the artifact when it is missing or a re-download is forced.
    /// Failure to obtain one is logged and leaves the patch untouched.
    fn refresh_artifact(
        &self,
        record: &CatalogRecord,
        remote: &RemoteProduction,
        force: bool,
        progress: &dyn SyncProgress,
        stat: &mut ReconcileStat,
        patch: &mut RecordPatch,
    ) {
        let path = self.artifact_path(record);
        let present = path.is_file();
        if !present {
            stat.missing += 1;
        }
        if present && !force {
            return;
        }
        let label = record_label(record);
        if self.config.options.dry_run {
            log::info!("{label}: dry run, not downloading");
            return;
        }

        let on_bytes = |bytes: u64, total: Option<u64>| progress.on_download(bytes, total);
        match fetch_artifact(
            &remote.download_links,
            &self.config.catalog_host,
            &self.fetcher,
            &path,
            &on_bytes,
        ) {
            Ok(downloaded) => {
                log::info!("{label}: downloaded {} ({} bytes)", downloaded.filename, downloaded.size);
                patch.reset_artifact = true;
                patch.filename = Some(downloaded.filename);
                patch.last_modified = downloaded.last_modified;
            }
            Err(e) => log::warn!("{label}: no artifact obtained: {e}"),
        }
    }

    /// Compute missing digests and listing from the local artifact, then
    /// pick launcher and readme.
    ///
    /// An artifact the archiver cannot list keeps its digests and merged
    /// metadata; only the listing and the classification are skipped.
    fn backfill(&self, record: &CatalogRecord, patch: &mut RecordPatch) -> Result<(), SyncError> {
        let mut working = record.clone();
        working.apply(patch);
        let overwrite = self.config.options.overwrite;
        if !working.is_incomplete() && !overwrite {
            return Ok(());
        }

        let label = record_label(record);
        let path = self.artifact_path(record);
        let filename = working.filename.clone().unwrap_or_else(|| record.uuid.clone());
        let mut listed_now = false;
        if path.is_file() {
            if working.file_size.is_none()
                || working.weak_hash.is_none()
                || working.strong_hash.is_none()
            {
                let digests = digest_file(&path)?;
                if working.file_size.is_none() {
                    patch.file_size = Some(digests.size);
                }
                if working.weak_hash.is_none() {
                    patch.weak_hash = Some(digests.weak);
                }
                if working.strong_hash.is_none() {
                    patch.strong_hash = Some(digests.strong);
                }
            }
            if working.member_listing.is_none() {
                match self.archiver.list(&path, &filename) {
                    Ok(members) => {
                        patch.member_listing = Some(join_listing(&members));
                        listed_now = true;
                    }
                    Err(e) => log::warn!("{label}: no member listing for {filename}: {e}"),
                }
            }
        } else {
            log::debug!(
                "{label}: artifact not on disk, missing {}",
                working.missing_fields().join(", ")
            );
        }

        // A cached listing is only classified again on request.
        if !listed_now && !overwrite {
            return Ok(());
        }

        working.apply(patch);
        let Some(listing) = working.member_listing.clone() else {
            return Ok(());
        };
        let members: Vec<&str> = listing.lines().filter(|m| !m.is_empty()).collect();
        let variants = record_variants(&working);
        let dos = working.is_dos();
        let result = classify(strip_extension(&filename), &members, &variants, dos);

        if let Some(readme) = result.readme
            && working.readme_file.as_deref() != Some(readme.as_str())
        {
            patch.readme_file = Some(readme);
        }
        if dos
            && let Some(launcher) = result.launcher
            && working.launch_binary.as_deref() != Some(launcher.as_str())
        {
            patch.launch_binary = Some(launcher);
        }
        Ok(())
    }

    fn persist(&self, record: &CatalogRecord, patch: &RecordPatch) -> Result<SingleOutcome, SyncError> {
        if patch.is_empty() {
            return Ok(SingleOutcome::NothingToDo);
        }
        let stmt = build_update(record.id, patch, Utc::now(), &self.config.actor_id);
        let columns = data_columns(&stmt);
        if self.config.options.dry_run {
            log::info!(
                "{}: dry run, would update {}",
                record_label(record),
                columns.join(", ")
            );
            return Ok(SingleOutcome::WouldUpdate(columns));
        }
        self.store.execute(&stmt)?;
        Ok(SingleOutcome::Updated(columns))
    }
}

/// Statement columns without the trailing bookkeeping pair.
fn data_columns(stmt: &UpdateStatement) -> Vec<&'static str> {
    let n = stmt.columns.len().saturating_sub(2);
    stmt.columns[..n].to_vec()
}

/// Short human label for logs and the status line.
pub fn record_label(record: &CatalogRecord) -> String {
    let name = record
        .title
        .as_deref()
        .or(record.filename.as_deref())
        .unwrap_or(&record.uuid);
    format!("#{} {}", record.id, name)
}
