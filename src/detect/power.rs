//! Power supplies, the external power daemon, and host role signals.
use super::observe_string;
use crate::exec::Executor;
use crate::sysfs::{StateReader, paths};

/// Installation and service state of an external power manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerDaemonStatus {
    /// Service name, e.g. `tlp`.
    pub name: String,
    /// Binary found on PATH.
    pub installed: bool,
    /// `systemctl is-enabled` reports `enabled`.
    pub enabled: bool,
    /// `systemctl is-active` reports `active`.
    pub active: bool,
}

impl PowerDaemonStatus {
    /// One-line state, e.g. `tlp is enabled and active`.
    #[must_use]
    pub fn describe(&self) -> String {
        let state = match (self.installed, self.enabled, self.active) {
            (false, _, _) => "not installed",
            (true, true, true) => "enabled and active",
            (true, true, false) => "enabled but inactive",
            (true, false, true) => "active but not enabled",
            (true, false, false) => "installed but disabled",
        };
        format!("{} is {state}", self.name)
    }
}

/// Power management state relevant to reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerInfo {
    /// The configured power daemon.
    pub daemon: PowerDaemonStatus,
}

/// Query the power daemon through systemd.
///
/// A daemon that is not installed is reported as neither enabled nor
/// active without invoking `systemctl`.
#[must_use]
pub fn detect(executor: &dyn Executor, daemon: &str) -> PowerInfo {
    let mut status = PowerDaemonStatus {
        name: daemon.to_string(),
        ..PowerDaemonStatus::default()
    };
    if executor.which(daemon) {
        status.installed = true;
        status.enabled = systemctl_reports(executor, "is-enabled", daemon, "enabled");
        status.active = systemctl_reports(executor, "is-active", daemon, "active");
    }
    tracing::debug!("power daemon: {}", status.describe());
    PowerInfo { daemon: status }
}

fn systemctl_reports(executor: &dyn Executor, verb: &str, unit: &str, expected: &str) -> bool {
    executor
        .run_unchecked("systemctl", &[verb, unit])
        .is_ok_and(|r| r.stdout.trim() == expected)
}

/// Battery presence and current power source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplyState {
    /// At least one battery supply exists.
    pub has_battery: bool,
    /// Running from battery.
    pub on_battery: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupplyKind {
    Battery,
    Mains,
    Other,
}

fn supply_kind(reader: &dyn StateReader, name: &str) -> SupplyKind {
    let declared = observe_string(reader, &paths::power_supply(name, "type"));
    match declared.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("battery") => SupplyKind::Battery,
        Some("mains") => SupplyKind::Mains,
        Some(_) => SupplyKind::Other,
        None if name.starts_with("BAT") => SupplyKind::Battery,
        None if name.starts_with("AC") || name.starts_with("ADP") => SupplyKind::Mains,
        None => SupplyKind::Other,
    }
}

/// Inspect `/sys/class/power_supply`.
///
/// With mains adapters present, the host is on battery when none of them
/// reports `online == 1`. Without adapters, a battery reporting
/// `Discharging` means battery power. Anything unreadable means AC.
#[must_use]
pub fn supply_state(reader: &dyn StateReader) -> SupplyState {
    let Ok(names) = reader.list_dir(paths::POWER_SUPPLY_BASE) else {
        return SupplyState::default();
    };

    let mut has_battery = false;
    let mut discharging = false;
    let mut mains_online: Vec<Option<bool>> = Vec::new();

    for name in &names {
        match supply_kind(reader, name) {
            SupplyKind::Battery => {
                has_battery = true;
                let status = observe_string(reader, &paths::power_supply(name, "status"));
                discharging |= status.as_deref() == Some("Discharging");
            }
            SupplyKind::Mains => {
                let online = reader
                    .read_int(&paths::power_supply(name, "online"))
                    .ok()
                    .map(|v| v == 1);
                mains_online.push(online);
            }
            SupplyKind::Other => {}
        }
    }

    let on_battery = if mains_online.is_empty() {
        has_battery && discharging
    } else {
        mains_online.contains(&Some(false)) && !mains_online.contains(&Some(true))
    };

    SupplyState {
        has_battery,
        on_battery,
    }
}

/// Signals about the host's role that live outside sysfs.
#[cfg_attr(test, mockall::automock)]
pub trait HostSignals {
    /// A graphical session is present (`DISPLAY` or `WAYLAND_DISPLAY`).
    fn has_display(&self) -> bool;

    /// The systemd default target, e.g. `graphical.target`.
    fn default_target(&self) -> Option<String>;
}

/// [`HostSignals`] read from the process environment and `systemctl`.
#[derive(Clone, Copy)]
pub struct SystemSignals<'a> {
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for SystemSignals<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSignals").finish_non_exhaustive()
    }
}

impl<'a> SystemSignals<'a> {
    /// Create signals backed by `executor`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }
}

impl HostSignals for SystemSignals<'_> {
    fn has_display(&self) -> bool {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|var| std::env::var(var).is_ok_and(|v| !v.is_empty()))
    }

    fn default_target(&self) -> Option<String> {
        self.executor
            .run_unchecked("systemctl", &["get-default"])
            .ok()
            .filter(|r| r.success)
            .map(|r| r.stdout.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}
