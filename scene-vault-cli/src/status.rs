//! Single-line status display for reconciliation runs.
//!
//! Each record overwrites the same spinner line; finished records are only
//! printed when something happened to them. Non-interactive runs fall back to
//! [`LogProgress`].

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use scene_vault_sync::{LogProgress, RecordOutcome, SingleOutcome, SyncProgress};

pub(crate) struct StatusLine {
    pb: ProgressBar,
}

impl StatusLine {
    pub(crate) fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }
}

impl Drop for StatusLine {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}

/// Spinner on an interactive terminal; plain log lines when quiet or
/// redirected.
pub(crate) fn reporter(quiet: bool) -> Box<dyn SyncProgress> {
    if wants_spinner(quiet, io::stderr().is_terminal()) {
        Box::new(StatusLine::new())
    } else {
        Box::new(LogProgress)
    }
}

fn wants_spinner(quiet: bool, terminal: bool) -> bool {
    terminal && !quiet
}

impl SyncProgress for StatusLine {
    fn on_record(&self, current: usize, total: usize, label: &str) {
        self.pb.set_message(format!("[{current}/{total}] {label}"));
    }

    fn on_download(&self, bytes: u64, total: Option<u64>) {
        let msg = match total {
            Some(t) if t > 0 => format!("downloading {}/{} KB", bytes / 1024, t / 1024),
            _ => format!("downloading {} KB", bytes / 1024),
        };
        self.pb.set_message(msg);
    }

    fn on_outcome(&self, label: &str, outcome: &RecordOutcome) {
        let line = match outcome {
            RecordOutcome::Finished(SingleOutcome::NothingToDo | SingleOutcome::NotLinked) => {
                return;
            }
            RecordOutcome::Finished(o @ SingleOutcome::Skipped(_)) => format!(
                "  {} {}: {}",
                "-".if_supports_color(Stdout, |t| t.yellow()),
                label,
                o
            ),
            RecordOutcome::Finished(o) => format!(
                "  {} {}: {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                label,
                o
            ),
            RecordOutcome::Failed(e) => format!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                label,
                e
            ),
        };
        self.pb.suspend(|| log::info!("{line}"));
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| {
            log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
        });
    }

    fn on_complete(&self, _message: &str) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_only_on_interactive_runs() {
        assert!(wants_spinner(false, true));
        assert!(!wants_spinner(true, true));
        assert!(!wants_spinner(false, false));
    }
}
