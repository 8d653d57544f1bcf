//! Block devices and their I/O queue settings.
use std::fmt;

use super::{observe_bracketed, observe_int};
use crate::sysfs::{StateReader, paths};

/// Device name prefixes that are never tuned (virtual or stacked devices).
const IGNORED_PREFIXES: &[&str] = &["loop", "ram", "zram", "dm-"];

/// Storage device class, selecting the scheduler column of the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskKind {
    /// NVMe namespace.
    Nvme,
    /// Non-rotational SATA/SAS/virtio device.
    Ssd,
    /// Rotational disk.
    Hdd,
}

impl fmt::Display for DiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nvme => write!(f, "nvme"),
            Self::Ssd => write!(f, "ssd"),
            Self::Hdd => write!(f, "hdd"),
        }
    }
}

impl DiskKind {
    /// Classify a device by name and `queue/rotational` flag.
    #[must_use]
    pub fn classify(name: &str, rotational: bool) -> Self {
        if name.starts_with("nvme") {
            Self::Nvme
        } else if rotational {
            Self::Hdd
        } else {
            Self::Ssd
        }
    }
}

/// One block device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    /// Kernel name, e.g. `nvme0n1`.
    pub name: String,
    /// Device class.
    pub kind: DiskKind,
    /// Active I/O scheduler.
    pub scheduler: Option<String>,
    /// `queue/read_ahead_kb`.
    pub read_ahead_kb: Option<i64>,
}

/// All tunable block devices, in `/sys/block` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageState {
    /// Detected devices.
    pub disks: Vec<Disk>,
}

/// Enumerate block devices.
#[must_use]
pub fn detect(reader: &dyn StateReader) -> StorageState {
    let names = match reader.list_dir(paths::BLOCK_BASE) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!("unobserved: {e}");
            return StorageState::default();
        }
    };

    let disks = names
        .into_iter()
        .filter(|name| !IGNORED_PREFIXES.iter().any(|p| name.starts_with(p)))
        .map(|name| {
            let rotational =
                observe_int(reader, &paths::block_queue(&name, "rotational")) == Some(1);
            Disk {
                kind: DiskKind::classify(&name, rotational),
                scheduler: observe_bracketed(reader, &paths::block_queue(&name, "scheduler")),
                read_ahead_kb: observe_int(reader, &paths::block_queue(&name, "read_ahead_kb")),
                name,
            }
        })
        .collect();

    StorageState { disks }
}
