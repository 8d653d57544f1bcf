//! Boot-time artifacts: the sysctl drop-in and the udev disk rules.
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::detect::DiskKind;
use crate::profile::Profile;

/// Default sysctl drop-in location.
pub const DEFAULT_SYSCTL_PATH: &str = "/etc/sysctl.d/99-tuner.conf";
/// Default udev rules location.
pub const DEFAULT_UDEV_PATH: &str = "/etc/udev/rules.d/99-tuner-disk.rules";

/// Render the sysctl drop-in for `profile`.
#[must_use]
pub fn render_sysctl(profile: &Profile) -> String {
    let v = &profile.values;
    let mut out = header(profile);
    let settings: [(&str, String); 6] = [
        ("vm.swappiness", v.swappiness.to_string()),
        ("vm.dirty_background_ratio", v.dirty_background_ratio.to_string()),
        ("vm.dirty_ratio", v.dirty_ratio.to_string()),
        ("vm.dirty_expire_centisecs", v.dirty_expire_centisecs.to_string()),
        ("vm.dirty_writeback_centisecs", v.dirty_writeback_centisecs.to_string()),
        ("vm.vfs_cache_pressure", v.vfs_cache_pressure.to_string()),
    ];
    for (key, value) in settings {
        let _ = writeln!(out, "{key} = {value}");
    }
    out.push('\n');

    if v.tcp_congestion == "bbr" {
        out.push_str("net.core.default_qdisc = fq\n");
    }
    let settings: [(&str, String); 7] = [
        ("net.ipv4.tcp_congestion_control", v.tcp_congestion.to_string()),
        ("net.ipv4.tcp_fastopen", v.tcp_fastopen.to_string()),
        ("net.ipv4.tcp_mtu_probing", v.tcp_mtu_probing.to_string()),
        ("net.core.rmem_max", v.rmem_max.to_string()),
        ("net.core.wmem_max", v.wmem_max.to_string()),
        ("net.ipv4.tcp_rmem", v.tcp_rmem.to_string()),
        ("net.ipv4.tcp_wmem", v.tcp_wmem.to_string()),
    ];
    for (key, value) in settings {
        let _ = writeln!(out, "{key} = {value}");
    }
    out
}

/// Render the udev rules for `profile`: one rule per disk class.
#[must_use]
pub fn render_udev(profile: &Profile) -> String {
    let v = &profile.values;
    let mut out = header(profile);
    let classes = [
        (DiskKind::Nvme, r#"KERNEL=="nvme[0-9]*n[0-9]*""#),
        (DiskKind::Ssd, r#"KERNEL=="sd[a-z]*", ATTR{queue/rotational}=="0""#),
        (DiskKind::Hdd, r#"KERNEL=="sd[a-z]*", ATTR{queue/rotational}=="1""#),
    ];
    for (kind, matcher) in classes {
        let _ = write!(
            out,
            r#"ACTION=="add|change", {matcher}, ATTR{{queue/scheduler}}="{}""#,
            v.scheduler_for(kind)
        );
        if v.read_ahead_kb > 0 {
            let _ = write!(out, r#", ATTR{{queue/read_ahead_kb}}="{}""#, v.read_ahead_kb);
        }
        out.push('\n');
    }
    out
}

fn header(profile: &Profile) -> String {
    format!(
        "# Generated by tuner for profile: {}\n# Remove with `tuner reset`.\n\n",
        profile.name()
    )
}

/// Locations of the boot-time artifacts.
#[derive(Debug, Clone)]
pub struct DropIns {
    /// sysctl drop-in path.
    pub sysctl: PathBuf,
    /// udev rules path.
    pub udev: PathBuf,
}

impl DropIns {
    /// Artifacts at the given paths.
    #[must_use]
    pub fn new(sysctl: impl Into<PathBuf>, udev: impl Into<PathBuf>) -> Self {
        Self {
            sysctl: sysctl.into(),
            udev: udev.into(),
        }
    }

    /// Render and write both artifacts, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn write(&self, profile: &Profile) -> Result<()> {
        write_file(&self.sysctl, &render_sysctl(profile))?;
        write_file(&self.udev, &render_udev(profile))
    }

    /// Remove the sysctl drop-in. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_sysctl(&self) -> Result<()> {
        remove_file(&self.sysctl)
    }

    /// Remove the udev rules. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_udev(&self) -> Result<()> {
        remove_file(&self.udev)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(e).with_context(|| format!("failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}
