#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
//! Integration tests for the `apply` command.
//!
//! These tests run the full detect → classify → compute → apply pipeline
//! against a fake `/sys` and `/proc` tree and check the resulting file
//! contents, the computed change list, and idempotence of a second run.

mod common;

use common::FakeHost;
use tuner_cli::cli::ApplyOpts;
use tuner_cli::commands::apply::{self, ApplyReport};
use tuner_cli::logging::{ChangeStatus, Logger};
use tuner_cli::sysfs::paths;
use tuner_cli::tune;

fn auto(profile: &str) -> ApplyOpts {
    ApplyOpts {
        profile: Some(profile.to_string()),
        auto: true,
        dry_run: false,
    }
}

// ---------------------------------------------------------------------------
// Snapshot: computed change list
// ---------------------------------------------------------------------------

/// The desktop change list for a stock host, in apply order.
///
/// Guards the CPU → memory → storage → network ordering and the display
/// format of every parameter.
#[test]
fn desktop_changes_on_stock_host() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");
    let profile = host.resolve_profile(Some("desktop"), &log).unwrap();
    let reconciliation = tune::compute_changes(&host.snapshot(), &profile.values);

    assert!(reconciliation.suppressed.is_empty());
    let lines: Vec<String> = reconciliation
        .changes
        .iter()
        .map(|c| format!("[{}] {c}", c.subsystem()))
        .collect();
    insta::assert_snapshot!("desktop_changes_on_stock_host", lines.join("\n"));
}

// ---------------------------------------------------------------------------
// Apply pipeline
// ---------------------------------------------------------------------------

#[test]
fn apply_writes_every_target_value() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");

    let report = apply::execute(&host, &auto("desktop"), |_| Ok(false), &log).unwrap();

    let ApplyReport::Applied(outcome) = &report else {
        panic!("expected changes to be applied, got {report:?}");
    };
    assert_eq!(outcome.succeeded, 14);
    assert!(outcome.is_clean());

    for cpu in ["cpu0", "cpu1"] {
        assert_eq!(
            fake.read(&paths::cpufreq(cpu, paths::ATTR_GOVERNOR)),
            "performance"
        );
        assert_eq!(
            fake.read(&paths::cpufreq(cpu, paths::ATTR_EPP)),
            "balance_performance"
        );
    }
    assert_eq!(fake.read(paths::INTEL_NO_TURBO), "0");
    assert_eq!(fake.read(paths::VM_SWAPPINESS), "10");
    assert_eq!(fake.read(paths::THP_ENABLED), "madvise");
    assert_eq!(fake.read("/sys/block/sda/queue/scheduler"), "kyber");
    assert_eq!(fake.read("/sys/block/nvme0n1/queue/read_ahead_kb"), "256");
    assert_eq!(fake.read(paths::TCP_RMEM), "4096 131072 67108864");
    // Ignored device class is never touched.
    assert_eq!(fake.read("/sys/block/loop0/queue/scheduler"), "[none]");

    let entries = log.change_entries();
    assert_eq!(entries.len(), 14);
    assert!(entries.iter().all(|e| e.status == ChangeStatus::Applied));
}

#[test]
fn second_apply_finds_nothing_to_do() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");

    apply::execute(&host, &auto("desktop"), |_| Ok(true), &log).unwrap();
    let again = apply::execute(&host, &auto("desktop"), |_| Ok(true), &log).unwrap();

    assert_eq!(again, ApplyReport::UpToDate);
}

#[test]
fn switching_profiles_only_touches_differences() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");
    apply::execute(&host, &auto("desktop"), |_| Ok(true), &log).unwrap();

    let profile = host.resolve_profile(Some("server"), &log).unwrap();
    let reconciliation = tune::compute_changes(&host.snapshot(), &profile.values);
    let parameters: Vec<&str> = reconciliation
        .changes
        .iter()
        .map(tune::Change::parameter)
        .collect();

    assert_eq!(
        parameters,
        vec![
            "Energy Perf Pref",
            "Dirty Background Ratio",
            "Dirty Ratio",
            "Dirty Expire",
            "Dirty Writeback",
            "VFS Cache Pressure",
            "Transparent Huge Pages",
            "Recv Buffer Max",
            "Send Buffer Max",
            "TCP Recv Buffers",
            "TCP Send Buffers",
        ]
    );
}

#[test]
fn dry_run_leaves_host_untouched() {
    let fake = FakeHost::stock_desktop();
    let host = fake.host();
    let log = Logger::new("test");
    let opts = ApplyOpts {
        dry_run: true,
        ..auto("desktop")
    };

    let report = apply::execute(&host, &opts, |_| Ok(true), &log).unwrap();

    assert_eq!(report, ApplyReport::DryRun(14));
    assert_eq!(fake.read(paths::VM_SWAPPINESS), "60");
    assert_eq!(fake.read(paths::CPU_GOVERNOR), "powersave");
    assert!(
        log.change_entries()
            .iter()
            .all(|e| e.status == ChangeStatus::DryRun)
    );
}

#[test]
fn unreadable_tunables_are_skipped_not_failed() {
    let fake = FakeHost::empty();
    fake.write(paths::VM_SWAPPINESS, "60\n")
        .write(paths::TCP_FASTOPEN, "not-a-number\n");
    let host = fake.host();
    let log = Logger::new("test");

    let report = apply::execute(&host, &auto("server"), |_| Ok(true), &log).unwrap();

    let ApplyReport::Applied(outcome) = &report else {
        panic!("expected one change, got {report:?}");
    };
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(fake.read(paths::TCP_FASTOPEN), "not-a-number");
}

#[test]
fn failed_write_is_counted_and_the_rest_still_apply() {
    let fake = FakeHost::stock_desktop();
    // cpu1's governor is written but never read; a directory there makes
    // only that write fail.
    std::fs::remove_file(fake.path("/sys/devices/system/cpu/cpu1/cpufreq/scaling_governor"))
        .unwrap();
    std::fs::create_dir_all(fake.path("/sys/devices/system/cpu/cpu1/cpufreq/scaling_governor"))
        .unwrap();
    let host = fake.host();
    let log = Logger::new("test");

    let report = apply::execute(&host, &auto("desktop"), |_| Ok(true), &log).unwrap();

    let ApplyReport::Applied(outcome) = &report else {
        panic!("expected changes to be applied, got {report:?}");
    };
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.succeeded, 13);
    assert_eq!(outcome.failures, vec!["CPU Governor"]);
    assert_eq!(fake.read(paths::VM_SWAPPINESS), "10");
    assert_eq!(log.failure_count(), 1);
}
