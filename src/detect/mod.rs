//! Snapshot of the live tunables the engine reconciles.
//!
//! Every field is an [`Option`]: `None` means the value could not be
//! observed (missing node, permission, parse failure). Observation misses
//! are logged at debug level and never surface as errors.
pub mod cpu;
pub mod memory;
pub mod network;
pub mod power;
pub mod storage;

pub use cpu::{CpuState, TurboState, TurboSurface};
pub use memory::MemoryState;
pub use network::NetworkState;
pub use power::{HostSignals, PowerDaemonStatus, PowerInfo, SupplyState, SystemSignals};
pub use storage::{Disk, DiskKind, StorageState};

use crate::exec::Executor;
use crate::sysfs::StateReader;

/// Current values of every managed subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// CPU scaling state.
    pub cpu: CpuState,
    /// Virtual memory state.
    pub memory: MemoryState,
    /// Block devices and their queue settings.
    pub storage: StorageState,
    /// TCP/IP stack state.
    pub network: NetworkState,
    /// Power management daemon state.
    pub power: PowerInfo,
}

impl SystemSnapshot {
    /// Read every managed tunable from the live system.
    ///
    /// `power_daemon` names the external power manager whose presence
    /// defers CPU tuning (normally `tlp`).
    #[must_use]
    pub fn detect(
        reader: &dyn StateReader,
        executor: &dyn Executor,
        power_daemon: &str,
    ) -> Self {
        Self {
            cpu: cpu::detect(reader),
            memory: memory::detect(reader),
            storage: storage::detect(reader),
            network: network::detect(reader),
            power: power::detect(executor, power_daemon),
        }
    }
}

/// Read a string tunable, folding errors into `None`.
pub(crate) fn observe_string(reader: &dyn StateReader, path: &str) -> Option<String> {
    reader
        .read_string(path)
        .map_err(|e| tracing::debug!("unobserved: {e}"))
        .ok()
}

/// Read an integer tunable, folding errors into `None`.
pub(crate) fn observe_int(reader: &dyn StateReader, path: &str) -> Option<i64> {
    reader
        .read_int(path)
        .map_err(|e| tracing::debug!("unobserved: {e}"))
        .ok()
}

/// Read a `[selected]` tunable, folding errors into `None`.
pub(crate) fn observe_bracketed(reader: &dyn StateReader, path: &str) -> Option<String> {
    reader
        .read_bracketed(path)
        .map_err(|e| tracing::debug!("unobserved: {e}"))
        .ok()
}
