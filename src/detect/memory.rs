//! Virtual memory tunables.
use super::{observe_bracketed, observe_int};
use crate::sysfs::{StateReader, paths};

/// `vm.*` sysctls and transparent huge page mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    /// `vm.swappiness`.
    pub swappiness: Option<i64>,
    /// `vm.dirty_background_ratio`.
    pub dirty_background_ratio: Option<i64>,
    /// `vm.dirty_ratio`.
    pub dirty_ratio: Option<i64>,
    /// `vm.dirty_expire_centisecs`.
    pub dirty_expire_centisecs: Option<i64>,
    /// `vm.dirty_writeback_centisecs`.
    pub dirty_writeback_centisecs: Option<i64>,
    /// `vm.vfs_cache_pressure`.
    pub vfs_cache_pressure: Option<i64>,
    /// Active transparent huge page mode.
    pub thp: Option<String>,
}

/// Read memory tunables.
#[must_use]
pub fn detect(reader: &dyn StateReader) -> MemoryState {
    MemoryState {
        swappiness: observe_int(reader, paths::VM_SWAPPINESS),
        dirty_background_ratio: observe_int(reader, paths::VM_DIRTY_BG_RATIO),
        dirty_ratio: observe_int(reader, paths::VM_DIRTY_RATIO),
        dirty_expire_centisecs: observe_int(reader, paths::VM_DIRTY_EXPIRE),
        dirty_writeback_centisecs: observe_int(reader, paths::VM_DIRTY_WRITEBACK),
        vfs_cache_pressure: observe_int(reader, paths::VM_VFS_CACHE_PRESSURE),
        thp: observe_bracketed(reader, paths::THP_ENABLED),
    }
}
