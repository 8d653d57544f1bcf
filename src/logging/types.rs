//! Core logging types: change entries, status, and the [`Log`] trait.

/// Outcome of a single tunable change for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    /// Human-readable parameter name.
    pub name: String,
    /// Final status of the change.
    pub status: ChangeStatus,
    /// Optional detail message (e.g. old and new value, or the write error).
    pub message: Option<String>,
}

/// Status of a processed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Value written.
    Applied,
    /// Skipped (path vanished, subsystem suppressed).
    Skipped,
    /// Listed but not written because of `--dry-run`.
    DryRun,
    /// Write rejected.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation;
/// engine code takes `&dyn Log` so tests can capture output.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a change result for the summary.
    fn record_change(&self, name: &str, status: ChangeStatus, message: Option<&str>);
}
