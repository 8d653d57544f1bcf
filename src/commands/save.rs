//! Command: persist tuning across reboots.
use anyhow::{Context as _, Result};

use super::Host;
use crate::cli::{GlobalOpts, SaveOpts};
use crate::logging::{Log, Logger};
use crate::persist::{BackupRecord, Reloader, SystemReloader};
use crate::platform::Platform;
use crate::tune;

/// What a save run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Backup record as written to disk.
    pub record: BackupRecord,
    /// Reload steps that failed (reported as warnings).
    pub reload_failures: usize,
}

/// Run the save command.
///
/// # Errors
///
/// Returns an error if not running as root, if the profile name is invalid,
/// or if the backup or drop-in files cannot be written.
pub fn run(global: &GlobalOpts, opts: &SaveOpts, log: &Logger) -> Result<()> {
    let host = Host::init_as_root(global, Platform::detect(), "save", log)?;
    let reloader = SystemReloader::new(host.executor.as_ref());
    execute(&host, opts, &reloader, log)?;
    Ok(())
}

/// Back up the values the profile would change, write the drop-ins, and
/// ask sysctl and udev to reload.
///
/// The backup holds exactly the current value of every parameter the profile
/// would change and replaces any earlier backup.
///
/// # Errors
///
/// Returns an error if the profile name is invalid or the backup or drop-in
/// files cannot be written. Reload failures only produce warnings.
pub fn execute(
    host: &Host,
    opts: &SaveOpts,
    reloader: &dyn Reloader,
    log: &dyn Log,
) -> Result<SaveReport> {
    log.stage("Resolving profile");
    let profile = host.resolve_profile(opts.profile.as_deref(), log)?;
    log.info(&format!("saving tuning for profile: {profile}"));

    log.stage("Backing up current values");
    let reconciliation = tune::compute_changes(&host.snapshot(), &profile.values);
    let values = tune::backup_map(&reconciliation.changes);
    let store = host.backup_store();
    if store.exists() {
        log.debug(&format!("overwriting backup at {}", store.path().display()));
    }
    let record = store
        .save(&profile.name(), values)
        .context("failed to save backup")?;
    log.info(&format!(
        "backup of {} values saved to {}",
        record.values.len(),
        store.path().display()
    ));

    log.stage("Writing persistent configuration");
    let drop_ins = host.drop_ins();
    drop_ins.write(&profile)?;
    log.info(&format!("written {}", drop_ins.sysctl.display()));
    log.info(&format!("written {}", drop_ins.udev.display()));

    log.stage("Reloading");
    let mut reload_failures = 0;
    if let Err(e) = reloader.reload_sysctl() {
        log.warn(&format!("failed to reload sysctl: {e:#}"));
        reload_failures += 1;
    }
    if let Err(e) = reloader.reload_udev() {
        log.warn(&format!("failed to reload udev: {e:#}"));
        reload_failures += 1;
    }

    log.info("tuning persisted");
    Ok(SaveReport {
        record,
        reload_failures,
    })
}
