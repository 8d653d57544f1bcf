#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `save` command.
//!
//! These tests run `save` against a fake host and check the backup document
//! and the rendered sysctl and udev drop-ins written beneath the root.

mod common;

use common::{FakeHost, RecordingReloader};
use tuner_cli::cli::SaveOpts;
use tuner_cli::commands::save;
use tuner_cli::logging::Logger;
use tuner_cli::sysfs::paths;

fn opts(profile: &str) -> SaveOpts {
    SaveOpts {
        profile: Some(profile.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Snapshot: rendered drop-ins
// ---------------------------------------------------------------------------

/// The sysctl drop-in written for the server profile.
#[test]
fn server_sysctl_dropin() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");
    save::execute(&host, &opts("server"), &RecordingReloader::default(), &log).unwrap();

    let sysctl = std::fs::read_to_string(fake.path("/etc/sysctl.d/99-tuner.conf")).unwrap();
    insta::assert_snapshot!("server_sysctl_dropin", sysctl);
}

/// The udev rules written for a laptop running on battery.
#[test]
fn laptop_battery_udev_rules() {
    let fake = FakeHost::stock_desktop();
    fake.write("/sys/class/power_supply/BAT0/type", "Battery\n")
        .write("/sys/class/power_supply/BAT0/status", "Discharging\n")
        .write("/sys/class/power_supply/AC/type", "Mains\n")
        .write("/sys/class/power_supply/AC/online", "0\n");
    let host = fake.host();
    let log = Logger::new("test");
    save::execute(&host, &opts("laptop"), &RecordingReloader::default(), &log).unwrap();

    let rules =
        std::fs::read_to_string(fake.path("/etc/udev/rules.d/99-tuner-disk.rules")).unwrap();
    insta::assert_snapshot!("laptop_battery_udev_rules", rules);
}

// ---------------------------------------------------------------------------
// Backup document
// ---------------------------------------------------------------------------

#[test]
fn backup_holds_pre_change_values_by_path() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let reloader = RecordingReloader::default();

    let log = Logger::new("test");
    let report = save::execute(&host, &opts("desktop"), &reloader, &log).unwrap();

    let values = &report.record.values;
    assert_eq!(values.len(), 14);
    assert_eq!(values[paths::CPU_GOVERNOR], "powersave");
    assert_eq!(values[paths::INTEL_NO_TURBO], "1");
    assert_eq!(values[paths::THP_ENABLED], "always");
    assert_eq!(values["/sys/block/sda/queue/scheduler"], "mq-deadline");
    assert_eq!(values[paths::TCP_WMEM], "4096 16384 4194304");
    assert_eq!(report.reload_failures, 0);
    assert_eq!(*reloader.calls.lock().unwrap(), vec!["sysctl", "udev"]);

    let raw = std::fs::read_to_string(fake.path("/etc/tuner/backup.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["profile"], "desktop");
    assert_eq!(doc["values"][paths::VM_SWAPPINESS], "60");
}

#[test]
fn save_does_not_write_tunables_itself() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();

    let log = Logger::new("test");
    save::execute(&host, &opts("desktop"), &RecordingReloader::default(), &log).unwrap();

    assert_eq!(fake.read(paths::VM_SWAPPINESS), "60");
    assert_eq!(fake.read(paths::CPU_GOVERNOR), "powersave");
}
