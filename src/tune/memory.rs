use super::{Change, Subsystem, diff_int, diff_text};
use crate::detect::MemoryState;
use crate::profile::TargetValues;
use crate::sysfs::paths;

pub(super) fn diff(state: &MemoryState, target: &TargetValues, out: &mut Vec<Change>) {
    let ints = [
        ("Swappiness", paths::VM_SWAPPINESS, state.swappiness, target.swappiness),
        (
            "Dirty Background Ratio",
            paths::VM_DIRTY_BG_RATIO,
            state.dirty_background_ratio,
            target.dirty_background_ratio,
        ),
        ("Dirty Ratio", paths::VM_DIRTY_RATIO, state.dirty_ratio, target.dirty_ratio),
        (
            "Dirty Expire",
            paths::VM_DIRTY_EXPIRE,
            state.dirty_expire_centisecs,
            target.dirty_expire_centisecs,
        ),
        (
            "Dirty Writeback",
            paths::VM_DIRTY_WRITEBACK,
            state.dirty_writeback_centisecs,
            target.dirty_writeback_centisecs,
        ),
        (
            "VFS Cache Pressure",
            paths::VM_VFS_CACHE_PRESSURE,
            state.vfs_cache_pressure,
            target.vfs_cache_pressure,
        ),
    ];
    for (parameter, path, observed, wanted) in ints {
        diff_int(out, Subsystem::Memory, parameter, path, observed, wanted);
    }

    diff_text(
        out,
        Subsystem::Memory,
        "Transparent Huge Pages",
        paths::THP_ENABLED,
        state.thp.as_deref(),
        target.thp,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PowerState, ProfileType};

    #[test]
    fn emits_in_fixed_order() {
        let state = MemoryState {
            swappiness: Some(60),
            dirty_background_ratio: Some(10),
            dirty_ratio: Some(20),
            dirty_expire_centisecs: Some(3000),
            dirty_writeback_centisecs: Some(500),
            vfs_cache_pressure: Some(100),
            thp: Some("madvise".to_string()),
        };
        let target = TargetValues::for_profile(ProfileType::Server, PowerState::Ac);
        let mut out = Vec::new();
        diff(&state, &target, &mut out);
        let params: Vec<&str> = out.iter().map(Change::parameter).collect();
        assert_eq!(
            params,
            vec![
                "Swappiness",
                "Dirty Background Ratio",
                "Dirty Ratio",
                "Dirty Expire",
                "Dirty Writeback",
                "VFS Cache Pressure",
                "Transparent Huge Pages",
            ]
        );
    }

    #[test]
    fn unobserved_fields_are_skipped() {
        let state = MemoryState {
            dirty_ratio: Some(40),
            ..MemoryState::default()
        };
        let target = TargetValues::for_profile(ProfileType::Desktop, PowerState::Ac);
        let mut out = Vec::new();
        diff(&state, &target, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out.first().map(Change::path).as_deref(), Some(paths::VM_DIRTY_RATIO));
    }
}
