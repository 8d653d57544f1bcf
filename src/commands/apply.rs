//! Command: apply tuning changes to the running system.
use anyhow::{Result, bail};

use super::Host;
use crate::cli::{ApplyOpts, GlobalOpts};
use crate::logging::{ChangeStatus, Log, Logger};
use crate::platform::Platform;
use crate::tune::{self, ApplyOutcome};

/// How an apply run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyReport {
    /// Every observed tunable already matches the profile.
    UpToDate,
    /// `--dry-run`: this many changes were listed and none written.
    DryRun(usize),
    /// The confirmation prompt was declined.
    Aborted,
    /// Changes were written.
    Applied(ApplyOutcome),
}

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if not running as root (unless `--dry-run`), if the
/// profile name is invalid, or if any change failed to apply.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Logger) -> Result<()> {
    let platform = Platform::detect();
    let host = if opts.dry_run {
        Host::init(global, platform, log)?
    } else {
        Host::init_as_root(global, platform, "apply", log)?
    };

    let report = execute(&host, opts, |_| super::prompt_confirm("\nProceed?"), log)?;
    log.print_summary();

    if let ApplyReport::Applied(outcome) = report
        && !outcome.is_clean()
    {
        bail!(
            "{} change(s) failed: {}",
            outcome.failed,
            outcome.failures.join(", ")
        );
    }
    Ok(())
}

/// Compute changes for the resolved profile, list them, confirm, and apply.
///
/// `confirm` receives the number of pending changes and is only consulted
/// when neither `--auto` nor `--dry-run` is set.
///
/// # Errors
///
/// Returns an error if the profile name is invalid or `confirm` fails.
pub fn execute(
    host: &Host,
    opts: &ApplyOpts,
    confirm: impl FnOnce(usize) -> Result<bool>,
    log: &dyn Log,
) -> Result<ApplyReport> {
    log.stage("Resolving profile");
    let profile = host.resolve_profile(opts.profile.as_deref(), log)?;
    log.info(&format!("profile: {profile}"));

    log.stage("Computing changes");
    let snapshot = host.snapshot();
    let reconciliation = tune::compute_changes(&snapshot, &profile.values);
    for suppression in &reconciliation.suppressed {
        log.warn(&format!(
            "skipping {} tuning: {}",
            suppression.subsystem, suppression.reason
        ));
    }

    if reconciliation.is_empty() {
        log.info("no changes needed, system is already tuned");
        return Ok(ApplyReport::UpToDate);
    }

    let changes = reconciliation.changes;
    log.info(&format!("{} changes to apply:", changes.len()));
    for change in &changes {
        log.info(&format!("  [{}] {change}", change.subsystem()));
    }

    if opts.dry_run {
        for change in &changes {
            log.dry_run(&format!("would set {} via {}", change.parameter(), change.path()));
            let detail = format!("{} → {}", change.old_value(), change.new_value());
            log.record_change(change.parameter(), ChangeStatus::DryRun, Some(&detail));
        }
        return Ok(ApplyReport::DryRun(changes.len()));
    }

    if !opts.auto && !confirm(changes.len())? {
        log.info("aborted");
        return Ok(ApplyReport::Aborted);
    }

    log.stage("Applying changes");
    let outcome = tune::apply(changes, &host.reader, opts.auto, log);
    log.info(&format!(
        "Applied: {} succeeded, {} failed",
        outcome.succeeded, outcome.failed
    ));
    if !outcome.is_clean() {
        log.warn("some changes failed");
    }
    Ok(ApplyReport::Applied(outcome))
}
