//! Command: restore original values and remove persisted configuration.
use anyhow::{Result, bail};

use super::Host;
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::persist::{self, Reloader, RestoreOutcome, SystemReloader};
use crate::platform::Platform;

/// Run the reset command.
///
/// # Errors
///
/// Returns an error if not running as root, if the backup is missing or
/// corrupt, or if any value could not be restored.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let host = Host::init_as_root(global, Platform::detect(), "reset", log)?;
    let reloader = SystemReloader::new(host.executor.as_ref());
    let outcome = execute(&host, &reloader, log)?;
    log.print_summary();

    if outcome.failed > 0 {
        bail!("{} value(s) could not be restored", outcome.failed);
    }
    Ok(())
}

/// Restore every backed-up value, remove the drop-ins, reload, and delete
/// the backup.
///
/// The backup is deleted once the restore pass has run, even if some values
/// failed to restore; those failures are reported in the outcome.
///
/// # Errors
///
/// Returns an error if the backup is missing or corrupt; nothing is touched
/// in that case.
pub fn execute(host: &Host, reloader: &dyn Reloader, log: &dyn Log) -> Result<RestoreOutcome> {
    let store = host.backup_store();
    let record = store.load()?;

    log.stage("Restoring original values");
    log.info(&format!(
        "backup for profile {} saved {}",
        record.profile, record.timestamp
    ));
    let outcome = persist::restore(&record, &host.reader, log);

    log.stage("Removing persistent configuration");
    let drop_ins = host.drop_ins();
    match drop_ins.remove_sysctl() {
        Ok(()) => log.info(&format!("removed {}", drop_ins.sysctl.display())),
        Err(e) => log.warn(&format!("{e:#}")),
    }
    match drop_ins.remove_udev() {
        Ok(()) => log.info(&format!("removed {}", drop_ins.udev.display())),
        Err(e) => log.warn(&format!("{e:#}")),
    }

    if let Err(e) = reloader.reload_sysctl() {
        log.warn(&format!("failed to reload sysctl: {e:#}"));
    }
    if let Err(e) = reloader.reload_udev() {
        log.warn(&format!("failed to reload udev: {e:#}"));
    }

    if let Err(e) = store.remove() {
        log.warn(&format!("failed to remove backup: {e}"));
    }

    log.info(&format!(
        "Restored {} values, {} failed",
        outcome.restored, outcome.failed
    ));
    Ok(outcome)
}
