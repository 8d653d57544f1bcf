#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `reset` command.
//!
//! Each test saves and applies a profile on a fake host, simulates what the
//! machine looks like afterwards, and checks that `reset` puts every
//! original value back and cleans up after itself.

mod common;

use common::{FakeHost, RecordingReloader};
use tuner_cli::cli::{ApplyOpts, SaveOpts};
use tuner_cli::commands::{apply, reset, save};
use tuner_cli::error::BackupError;
use tuner_cli::logging::{ChangeStatus, Logger};
use tuner_cli::persist::RestoreOutcome;
use tuner_cli::sysfs::paths;

/// Save then apply `profile`, the usual order on a real machine.
fn save_and_apply(fake: &FakeHost, profile: &str) {
    let host = fake.host();
    let log = Logger::new("test");
    let save_opts = SaveOpts {
        profile: Some(profile.to_string()),
    };
    save::execute(&host, &save_opts, &RecordingReloader::default(), &log).unwrap();
    let apply_opts = ApplyOpts {
        profile: Some(profile.to_string()),
        auto: true,
        dry_run: false,
    };
    apply::execute(&host, &apply_opts, |_| Ok(true), &log).unwrap();
}

#[test]
fn reset_restores_stock_values() {
    let fake = FakeHost::stock_desktop();
    save_and_apply(&fake, "desktop");
    assert_eq!(fake.read(paths::VM_SWAPPINESS), "10");

    let host = fake.host();
    let reloader = RecordingReloader::default();
    let log = Logger::new("test");
    let outcome = reset::execute(&host, &reloader, &log).unwrap();

    assert_eq!(
        outcome,
        RestoreOutcome {
            restored: 14,
            skipped: 0,
            failed: 0,
        }
    );
    assert_eq!(fake.read(paths::VM_SWAPPINESS), "60");
    assert_eq!(fake.read(paths::INTEL_NO_TURBO), "1");
    assert_eq!(fake.read(paths::THP_ENABLED), "always");
    assert_eq!(fake.read("/sys/block/sda/queue/scheduler"), "mq-deadline");
    assert_eq!(fake.read(paths::TCP_RMEM), "4096 131072 6291456");
    for cpu in ["cpu0", "cpu1"] {
        assert_eq!(
            fake.read(&paths::cpufreq(cpu, paths::ATTR_GOVERNOR)),
            "powersave"
        );
    }

    assert!(!fake.path("/etc/tuner/backup.json").exists());
    assert!(!fake.path("/etc/sysctl.d/99-tuner.conf").exists());
    assert!(!fake.path("/etc/udev/rules.d/99-tuner-disk.rules").exists());
    assert_eq!(*reloader.calls.lock().unwrap(), vec!["sysctl", "udev"]);
}

#[test]
fn reset_after_reset_reports_missing_backup() {
    let fake = FakeHost::stock_desktop();
    save_and_apply(&fake, "server");
    let host = fake.host();
    let log = Logger::new("test");
    reset::execute(&host, &RecordingReloader::default(), &log).unwrap();

    let err = reset::execute(&host, &RecordingReloader::default(), &log).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BackupError>(),
        Some(BackupError::Missing { .. })
    ));
    assert!(err.to_string().contains("nothing to reset"), "got: {err}");
}

#[test]
fn vanished_device_is_skipped() {
    let fake = FakeHost::stock_desktop();
    save_and_apply(&fake, "desktop");
    // The SSD was unplugged after tuning.
    std::fs::remove_dir_all(fake.path("/sys/block/sda")).unwrap();

    let host = fake.host();
    let log = Logger::new("test");
    let outcome = reset::execute(&host, &RecordingReloader::default(), &log).unwrap();

    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.restored, 13);
    assert!(
        log.change_entries()
            .iter()
            .any(|e| e.name == "/sys/block/sda/queue/scheduler"
                && e.status == ChangeStatus::Skipped)
    );
    assert!(!fake.path("/etc/tuner/backup.json").exists());
}
