//! Target tunable values per profile.
use super::{PowerState, ProfileType};
use crate::detect::DiskKind;

/// Desired tunable values for one profile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetValues {
    /// cpufreq scaling governor.
    pub governor: &'static str,
    /// Energy performance preference.
    pub epp: &'static str,
    /// Turbo boost enabled.
    pub turbo: bool,

    /// `vm.swappiness`.
    pub swappiness: i64,
    /// `vm.dirty_background_ratio`.
    pub dirty_background_ratio: i64,
    /// `vm.dirty_ratio`.
    pub dirty_ratio: i64,
    /// `vm.dirty_expire_centisecs`.
    pub dirty_expire_centisecs: i64,
    /// `vm.dirty_writeback_centisecs`.
    pub dirty_writeback_centisecs: i64,
    /// `vm.vfs_cache_pressure`.
    pub vfs_cache_pressure: i64,
    /// Transparent huge page mode: `always`, `madvise` or `never`.
    pub thp: &'static str,

    /// `net.ipv4.tcp_congestion_control`.
    pub tcp_congestion: &'static str,
    /// `net.ipv4.tcp_fastopen`.
    pub tcp_fastopen: i64,
    /// `net.ipv4.tcp_mtu_probing`.
    pub tcp_mtu_probing: i64,
    /// `net.core.rmem_max` in bytes.
    pub rmem_max: i64,
    /// `net.core.wmem_max` in bytes.
    pub wmem_max: i64,
    /// `net.ipv4.tcp_rmem` as `min default max`.
    pub tcp_rmem: &'static str,
    /// `net.ipv4.tcp_wmem` as `min default max`.
    pub tcp_wmem: &'static str,

    /// Scheduler for NVMe devices.
    pub sched_nvme: &'static str,
    /// Scheduler for non-rotational devices.
    pub sched_ssd: &'static str,
    /// Scheduler for rotational devices.
    pub sched_hdd: &'static str,
    /// `queue/read_ahead_kb`. Zero leaves read-ahead untouched.
    pub read_ahead_kb: i64,

    /// Leave CPU power settings alone when the power daemon is enabled.
    pub skip_if_power_daemon: bool,
}

const SERVER: TargetValues = TargetValues {
    governor: "performance",
    epp: "performance",
    turbo: true,
    swappiness: 10,
    dirty_background_ratio: 1,
    dirty_ratio: 5,
    dirty_expire_centisecs: 500,
    dirty_writeback_centisecs: 100,
    vfs_cache_pressure: 50,
    thp: "always",
    tcp_congestion: "bbr",
    tcp_fastopen: 3,
    tcp_mtu_probing: 1,
    rmem_max: 268_435_456,
    wmem_max: 268_435_456,
    tcp_rmem: "4096 1048576 268435456",
    tcp_wmem: "4096 1048576 268435456",
    sched_nvme: "none",
    sched_ssd: "kyber",
    sched_hdd: "bfq",
    read_ahead_kb: 256,
    skip_if_power_daemon: false,
};

const DESKTOP: TargetValues = TargetValues {
    governor: "performance",
    epp: "balance_performance",
    turbo: true,
    swappiness: 10,
    dirty_background_ratio: 10,
    dirty_ratio: 20,
    dirty_expire_centisecs: 3000,
    dirty_writeback_centisecs: 500,
    vfs_cache_pressure: 100,
    thp: "madvise",
    tcp_congestion: "bbr",
    tcp_fastopen: 3,
    tcp_mtu_probing: 1,
    rmem_max: 67_108_864,
    wmem_max: 67_108_864,
    tcp_rmem: "4096 131072 67108864",
    tcp_wmem: "4096 131072 67108864",
    sched_nvme: "none",
    sched_ssd: "kyber",
    sched_hdd: "bfq",
    read_ahead_kb: 256,
    skip_if_power_daemon: false,
};

const LAPTOP_AC: TargetValues = TargetValues {
    governor: "schedutil",
    epp: "balance_performance",
    dirty_background_ratio: 5,
    dirty_ratio: 15,
    sched_ssd: "bfq",
    skip_if_power_daemon: true,
    ..DESKTOP
};

const LAPTOP_BATTERY: TargetValues = TargetValues {
    governor: "powersave",
    epp: "balance_power",
    turbo: false,
    swappiness: 30,
    dirty_expire_centisecs: 6000,
    dirty_writeback_centisecs: 1500,
    read_ahead_kb: 128,
    ..LAPTOP_AC
};

impl TargetValues {
    /// Look up the target table for a profile.
    ///
    /// `power` only matters for [`ProfileType::Laptop`].
    #[must_use]
    pub const fn for_profile(kind: ProfileType, power: PowerState) -> Self {
        match (kind, power) {
            (ProfileType::Server, _) => SERVER,
            (ProfileType::Desktop, _) => DESKTOP,
            (ProfileType::Laptop, PowerState::Ac) => LAPTOP_AC,
            (ProfileType::Laptop, PowerState::Battery) => LAPTOP_BATTERY,
        }
    }

    /// Scheduler for a device class.
    #[must_use]
    pub const fn scheduler_for(&self, kind: DiskKind) -> &'static str {
        match kind {
            DiskKind::Nvme => self.sched_nvme,
            DiskKind::Ssd => self.sched_ssd,
            DiskKind::Hdd => self.sched_hdd,
        }
    }
}
