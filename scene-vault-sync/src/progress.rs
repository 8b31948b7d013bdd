//! Reconciliation progress reporting.

use crate::stats::RecordOutcome;

/// Trait for receiving reconciliation progress updates.
pub trait SyncProgress {
    /// Called before each record is processed.
    fn on_record(&self, current: usize, total: usize, label: &str);

    /// Called as artifact bytes arrive.
    fn on_download(&self, bytes: u64, total: Option<u64>);

    /// Called once a record has finished, successfully or not.
    fn on_outcome(&self, label: &str, outcome: &RecordOutcome);

    /// Called when a phase starts (e.g., "Refreshing 120 records").
    fn on_phase(&self, message: &str);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_record(&self, _current: usize, _total: usize, _label: &str) {}
    fn on_download(&self, _bytes: u64, _total: Option<u64>) {}
    fn on_outcome(&self, _label: &str, _outcome: &RecordOutcome) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_record(&self, current: usize, total: usize, label: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, label);
        } else {
            log::debug!("  [{}/{}] {}", current, total, label);
        }
    }

    fn on_download(&self, _bytes: u64, _total: Option<u64>) {}

    fn on_outcome(&self, label: &str, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Finished(o) => log::debug!("{}: {}", label, o),
            RecordOutcome::Failed(e) => log::info!("{}: failed: {}", label, e),
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
