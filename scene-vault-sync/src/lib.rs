//! Reconciliation of catalog records against the remote production service.
//!
//! [`Reconciler`] walks linked records one at a time: it fetches remote
//! metadata, merges title/credits/cross-reference changes, re-downloads
//! missing artifacts, backfills digests and the member listing, re-runs the
//! archive classifier, and persists everything that changed as a single
//! update per record.

pub mod engine;
pub mod error;
pub mod merge;
pub mod progress;
pub mod releaser;
pub mod settings;
pub mod stats;

pub use engine::{Pass, Reconciler, ScanMode, SyncConfig, SyncOptions, record_label};
pub use error::{SyncError, parse_key};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use releaser::{ReleaserEntry, releaser_report};
pub use settings::{Settings, settings_path};
pub use stats::{ReconcileStat, RecordOutcome, SingleOutcome};
