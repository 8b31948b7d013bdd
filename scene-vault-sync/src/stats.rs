use std::fmt;
use std::time::Duration;

/// Result of reconciling one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleOutcome {
    /// The record carries no production link.
    NotLinked,
    /// Linked, but nothing differed and nothing was missing.
    NothingToDo,
    /// Persisted; lists the written data columns.
    Updated(Vec<&'static str>),
    /// Dry run: these columns would have been written.
    WouldUpdate(Vec<&'static str>),
    /// The remote production is gone and the link was cleared.
    Unlinked,
    /// Left untouched this run.
    Skipped(String),
}

impl fmt::Display for SingleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLinked => f.write_str("not linked to a production"),
            Self::NothingToDo => f.write_str("nothing to do"),
            Self::Updated(cols) => write!(f, "updated {}", cols.join(", ")),
            Self::WouldUpdate(cols) => write!(f, "would update {}", cols.join(", ")),
            Self::Unlinked => f.write_str("production gone, unlinked"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

/// Per-record event handed to progress observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Finished(SingleOutcome),
    Failed(String),
}

/// Counters for one batch run.
#[derive(Debug, Default, Clone)]
pub struct ReconcileStat {
    /// Eligible rows.
    pub total: usize,
    /// Rows visited.
    pub count: usize,
    /// Local artifacts not found on disk.
    pub missing: usize,
    pub updated: usize,
    pub unlinked: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The run stopped early on request.
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl ReconcileStat {
    pub(crate) fn record(&mut self, outcome: &SingleOutcome) {
        match outcome {
            SingleOutcome::Updated(_) | SingleOutcome::WouldUpdate(_) => self.updated += 1,
            SingleOutcome::Unlinked => self.unlinked += 1,
            SingleOutcome::Skipped(_) => self.skipped += 1,
            SingleOutcome::NotLinked | SingleOutcome::NothingToDo => {}
        }
    }

    /// One-line summary for the end of a run.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} of {} records in {:.1}s: {} updated, {} unlinked, {} skipped, {} failed, {} missing artifacts",
            self.count,
            self.total,
            self.elapsed.as_secs_f64(),
            self.updated,
            self.unlinked,
            self.skipped,
            self.failed,
            self.missing,
        );
        if self.cancelled {
            line.push_str(" (cancelled)");
        }
        line
    }
}
