//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{ChangeEntry, ChangeStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are also written to `$XDG_CACHE_HOME/tuner/<command>.log`
/// by the file layer installed in
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    changes: Mutex<Vec<ChangeEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            changes: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded change entries.
    #[must_use]
    pub fn change_entries(&self) -> Vec<ChangeEntry> {
        self.changes.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a change result for the summary.
    pub fn record_change(&self, name: &str, status: ChangeStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.changes.lock() {
            guard.push(ChangeEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed changes.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.changes.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|c| c.status == ChangeStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded changes.
    pub fn print_summary(&self) {
        let changes = self.change_entries();
        if changes.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut applied = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for change in &changes {
            let (icon, color) = match change.status {
                ChangeStatus::Applied => {
                    applied += 1;
                    ("✓", "\x1b[32m")
                }
                ChangeStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                ChangeStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                ChangeStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = change
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", change.name));
        }

        let total = applied + skipped + dry_run + failed;
        self.info(&format!(
            "{total} changes: \x1b[32m{applied} applied\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_change(&self, name: &str, status: ChangeStatus, message: Option<&str>) {
        self.record_change(name, status, message);
    }
}
