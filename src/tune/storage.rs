use super::{Change, Subsystem, diff_int, diff_text};
use crate::detect::StorageState;
use crate::profile::TargetValues;
use crate::sysfs::paths;

pub(super) fn diff(state: &StorageState, target: &TargetValues, out: &mut Vec<Change>) {
    for disk in &state.disks {
        diff_text(
            out,
            Subsystem::Storage,
            &format!("{} scheduler", disk.name),
            &paths::block_queue(&disk.name, "scheduler"),
            disk.scheduler.as_deref(),
            target.scheduler_for(disk.kind),
        );

        if target.read_ahead_kb > 0 {
            diff_int(
                out,
                Subsystem::Storage,
                &format!("{} read_ahead_kb", disk.name),
                &paths::block_queue(&disk.name, "read_ahead_kb"),
                disk.read_ahead_kb,
                target.read_ahead_kb,
            );
        }
    }
}
