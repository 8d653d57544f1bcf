// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed fake host (a `/sys` and `/proc`
// tree plus artifact locations) and a fluent builder so each integration
// test can set up an isolated machine without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tuner_cli::commands::Host;
use tuner_cli::config::Config;
use tuner_cli::exec::{ExecResult, Executor};
use tuner_cli::persist::Reloader;
use tuner_cli::platform::{Os, Platform};
use tuner_cli::sysfs::{SysFs, paths};

/// Write a stock, untuned desktop into `root`.
///
/// Creates:
/// - `cpu0`, `cpu1` cpufreq with `powersave` / `balance_power`
/// - `intel_pstate/no_turbo` = 1 (turbo off)
/// - kernel-default `vm.*` values and THP `always`
/// - `nvme0n1` (none, read-ahead 128), `sda` SSD (mq-deadline), `loop0`
/// - `cubic` TCP with kernel-default buffers
pub fn setup_stock_desktop(root: &Path) {
    let files: &[(&str, &str)] = &[
        (paths::CPU_GOVERNOR, "powersave\n"),
        (paths::CPU_EPP, "balance_power\n"),
        (
            "/sys/devices/system/cpu/cpu1/cpufreq/scaling_governor",
            "powersave\n",
        ),
        (
            "/sys/devices/system/cpu/cpu1/cpufreq/energy_performance_preference",
            "balance_power\n",
        ),
        (paths::INTEL_NO_TURBO, "1\n"),
        (paths::VM_SWAPPINESS, "60\n"),
        (paths::VM_DIRTY_BG_RATIO, "10\n"),
        (paths::VM_DIRTY_RATIO, "20\n"),
        (paths::VM_DIRTY_EXPIRE, "3000\n"),
        (paths::VM_DIRTY_WRITEBACK, "500\n"),
        (paths::VM_VFS_CACHE_PRESSURE, "100\n"),
        (paths::THP_ENABLED, "[always] madvise never\n"),
        ("/sys/block/nvme0n1/queue/rotational", "0\n"),
        ("/sys/block/nvme0n1/queue/scheduler", "[none] mq-deadline\n"),
        ("/sys/block/nvme0n1/queue/read_ahead_kb", "128\n"),
        ("/sys/block/sda/queue/rotational", "0\n"),
        (
            "/sys/block/sda/queue/scheduler",
            "[mq-deadline] kyber bfq none\n",
        ),
        ("/sys/block/sda/queue/read_ahead_kb", "256\n"),
        ("/sys/block/loop0/queue/rotational", "0\n"),
        ("/sys/block/loop0/queue/scheduler", "[none]\n"),
        (paths::TCP_CONGESTION, "cubic\n"),
        (paths::TCP_FASTOPEN, "1\n"),
        (paths::TCP_MTU_PROBING, "0\n"),
        (paths::NET_RMEM_MAX, "212992\n"),
        (paths::NET_WMEM_MAX, "212992\n"),
        (paths::TCP_RMEM, "4096\t131072\t6291456\n"),
        (paths::TCP_WMEM, "4096\t16384\t4194304\n"),
    ];
    for (path, content) in files {
        write_file(root, path, content);
    }
}

/// Create `path` (absolute, re-based under `root`) with `content`.
pub fn write_file(root: &Path, path: &str, content: &str) {
    let full = root.join(path.trim_start_matches('/'));
    std::fs::create_dir_all(full.parent().expect("path has a parent")).expect("create dirs");
    std::fs::write(full, content).expect("write file");
}

/// Read `path` (absolute, re-based under `root`), trimmed.
pub fn read_file(root: &Path, path: &str) -> String {
    std::fs::read_to_string(root.join(path.trim_start_matches('/')))
        .expect("read file")
        .trim()
        .to_string()
}

/// An [`Executor`] that records every call and reports every program as
/// missing or failing, so no real `systemctl` or `sysctl` is touched.
#[derive(Debug, Default)]
pub struct OfflineExecutor {
    pub calls: Mutex<Vec<String>>,
}

impl OfflineExecutor {
    fn record(&self, program: &str, args: &[&str]) {
        self.calls
            .lock()
            .expect("lock")
            .push(format!("{program} {}", args.join(" ")));
    }
}

impl Executor for OfflineExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args);
        anyhow::bail!("{program} is not available in tests")
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args);
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: false,
            code: Some(1),
        })
    }

    fn which(&self, _: &str) -> bool {
        false
    }
}

/// [`Reloader`] that records which reloads were requested.
#[derive(Debug, Default)]
pub struct RecordingReloader {
    pub calls: Mutex<Vec<&'static str>>,
}

impl Reloader for RecordingReloader {
    fn reload_sysctl(&self) -> anyhow::Result<()> {
        self.calls.lock().expect("lock").push("sysctl");
        Ok(())
    }

    fn reload_udev(&self) -> anyhow::Result<()> {
        self.calls.lock().expect("lock").push("udev");
        Ok(())
    }
}

/// An isolated fake host backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct FakeHost {
    /// Temporary directory standing in for `/`.
    pub root: tempfile::TempDir,
}

impl FakeHost {
    /// An empty host: no tunables at all.
    pub fn empty() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A stock desktop as written by [`setup_stock_desktop`].
    pub fn stock_desktop() -> Self {
        let host = Self::empty();
        setup_stock_desktop(host.root_path());
        host
    }

    /// Path to the fake root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute location of `path` inside the fake root.
    pub fn path(&self, path: &str) -> PathBuf {
        self.root.path().join(path.trim_start_matches('/'))
    }

    /// Overwrite a tunable.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        write_file(self.root.path(), path, content);
        self
    }

    /// Read a tunable back.
    pub fn read(&self, path: &str) -> String {
        read_file(self.root.path(), path)
    }

    /// A [`Host`] over this root, running as root with default config.
    pub fn host(&self) -> Host {
        Host::with_parts(
            SysFs::new(self.root.path()),
            Box::new(OfflineExecutor::default()),
            Platform::new(Os::Linux, Some(0)),
            Config::default().rebased(self.root.path()),
        )
    }
}
