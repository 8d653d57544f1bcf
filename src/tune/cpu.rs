use super::{Change, Subsystem, WriteAction};
use crate::detect::CpuState;
use crate::profile::TargetValues;
use crate::sysfs::paths;

pub(super) fn diff(state: &CpuState, target: &TargetValues, out: &mut Vec<Change>) {
    if let Some(current) = state.governor.as_deref()
        && current != target.governor
    {
        out.push(Change::new(
            Subsystem::Cpu,
            "CPU Governor",
            current,
            target.governor,
            WriteAction::EachCpu {
                attribute: paths::ATTR_GOVERNOR,
                value: target.governor.to_string(),
            },
        ));
    }

    if let Some(current) = state.epp.as_deref()
        && current != target.epp
    {
        out.push(Change::new(
            Subsystem::Cpu,
            "Energy Perf Pref",
            current,
            target.epp,
            WriteAction::EachCpu {
                attribute: paths::ATTR_EPP,
                value: target.epp.to_string(),
            },
        ));
    }

    if let Some(turbo) = &state.turbo
        && turbo.enabled() != target.turbo
    {
        out.push(
            Change::new(
                Subsystem::Cpu,
                format!("Turbo Boost ({})", turbo.surface.label()),
                on_off(turbo.enabled()),
                on_off(target.turbo),
                WriteAction::Text {
                    path: turbo.surface.path().to_string(),
                    value: turbo.surface.encode(target.turbo).to_string(),
                },
            )
            .with_raw_old(turbo.raw.to_string()),
        );
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
