//! Well-known virtual filesystem paths for the tunables the engine manages.
#![allow(missing_docs)]

// CPU
pub const CPU_BASE: &str = "/sys/devices/system/cpu";
pub const CPU_GOVERNOR: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";
pub const CPU_EPP: &str = "/sys/devices/system/cpu/cpu0/cpufreq/energy_performance_preference";
pub const CPU_BOOST: &str = "/sys/devices/system/cpu/cpufreq/boost";
pub const INTEL_NO_TURBO: &str = "/sys/devices/system/cpu/intel_pstate/no_turbo";

/// Per-CPU attribute names written by governor/EPP changes.
pub const ATTR_GOVERNOR: &str = "scaling_governor";
pub const ATTR_EPP: &str = "energy_performance_preference";

// Memory
pub const VM_SWAPPINESS: &str = "/proc/sys/vm/swappiness";
pub const VM_DIRTY_BG_RATIO: &str = "/proc/sys/vm/dirty_background_ratio";
pub const VM_DIRTY_RATIO: &str = "/proc/sys/vm/dirty_ratio";
pub const VM_DIRTY_EXPIRE: &str = "/proc/sys/vm/dirty_expire_centisecs";
pub const VM_DIRTY_WRITEBACK: &str = "/proc/sys/vm/dirty_writeback_centisecs";
pub const VM_VFS_CACHE_PRESSURE: &str = "/proc/sys/vm/vfs_cache_pressure";
pub const THP_ENABLED: &str = "/sys/kernel/mm/transparent_hugepage/enabled";

// Storage
pub const BLOCK_BASE: &str = "/sys/block";

// Network
pub const TCP_CONGESTION: &str = "/proc/sys/net/ipv4/tcp_congestion_control";
pub const TCP_FASTOPEN: &str = "/proc/sys/net/ipv4/tcp_fastopen";
pub const TCP_MTU_PROBING: &str = "/proc/sys/net/ipv4/tcp_mtu_probing";
pub const NET_RMEM_MAX: &str = "/proc/sys/net/core/rmem_max";
pub const NET_WMEM_MAX: &str = "/proc/sys/net/core/wmem_max";
pub const TCP_RMEM: &str = "/proc/sys/net/ipv4/tcp_rmem";
pub const TCP_WMEM: &str = "/proc/sys/net/ipv4/tcp_wmem";

// Power / platform
pub const POWER_SUPPLY_BASE: &str = "/sys/class/power_supply";
pub const CHASSIS_TYPE: &str = "/sys/class/dmi/id/chassis_type";
pub const PROC_SELF_STATUS: &str = "/proc/self/status";

/// Path of a block device queue attribute, e.g. `/sys/block/sda/queue/scheduler`.
#[must_use]
pub fn block_queue(device: &str, attribute: &str) -> String {
    format!("{BLOCK_BASE}/{device}/queue/{attribute}")
}

/// Path of a per-CPU cpufreq attribute, e.g. `/sys/devices/system/cpu/cpu3/cpufreq/scaling_governor`.
#[must_use]
pub fn cpufreq(cpu: &str, attribute: &str) -> String {
    format!("{CPU_BASE}/{cpu}/cpufreq/{attribute}")
}

/// Path of a power supply attribute, e.g. `/sys/class/power_supply/AC/online`.
#[must_use]
pub fn power_supply(supply: &str, attribute: &str) -> String {
    format!("{POWER_SUPPLY_BASE}/{supply}/{attribute}")
}
