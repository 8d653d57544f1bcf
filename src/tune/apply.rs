//! Sequential execution of computed changes.
use super::Change;
use crate::logging::{ChangeStatus, Log};
use crate::sysfs::StateReader;

/// Counts from one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Changes written successfully.
    pub succeeded: usize,
    /// Changes whose write failed.
    pub failed: usize,
    /// Parameter names of the failed changes, in apply order.
    pub failures: Vec<String>,
}

impl ApplyOutcome {
    /// Whether every change was written.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Apply `changes` in order.
///
/// A failed write is logged and counted; the remaining changes still run.
/// Nothing is retried. With `auto` unset every change also gets a progress
/// line.
#[must_use]
pub fn apply(
    changes: Vec<Change>,
    reader: &dyn StateReader,
    auto: bool,
    log: &dyn Log,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    for change in changes {
        let detail = format!("{} → {}", change.old_value(), change.new_value());
        match change.action().execute(reader) {
            Ok(()) => {
                outcome.succeeded += 1;
                if !auto {
                    log.info(&format!("{change} ... OK"));
                }
                log.record_change(change.parameter(), ChangeStatus::Applied, Some(&detail));
            }
            Err(e) => {
                outcome.failed += 1;
                log.warn(&format!("{}: {e}", change.parameter()));
                log.record_change(change.parameter(), ChangeStatus::Failed, Some(&e.to_string()));
                outcome.failures.push(change.parameter().to_string());
            }
        }
    }

    outcome
}
