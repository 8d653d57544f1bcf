//! Reconciliation of observed tunables against a profile's target values.
//!
//! [`compute_changes`] is pure over its inputs: it never touches the
//! filesystem. Each emitted [`Change`] carries the [`WriteAction`] that
//! brings its tunable to the target, executed later by [`apply::apply`].
pub mod apply;
mod cpu;
mod memory;
mod network;
mod storage;

use std::collections::BTreeMap;
use std::fmt;

pub use apply::{ApplyOutcome, apply};

use crate::detect::SystemSnapshot;
use crate::error::SysfsError;
use crate::profile::TargetValues;
use crate::sysfs::{self, StateReader, paths};

/// Tunable family a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subsystem {
    /// Frequency scaling.
    Cpu,
    /// Virtual memory.
    Memory,
    /// Block I/O queues.
    Storage,
    /// TCP/IP stack.
    Network,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Memory => write!(f, "memory"),
            Self::Storage => write!(f, "storage"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A write operation against a [`StateReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    /// Write a string value to one path.
    Text {
        /// Target path.
        path: String,
        /// Value to write.
        value: String,
    },
    /// Write an integer value to one path.
    Int {
        /// Target path.
        path: String,
        /// Value to write.
        value: i64,
    },
    /// Write a cpufreq attribute on every CPU that exposes it.
    EachCpu {
        /// Attribute name under `cpuN/cpufreq/`.
        attribute: &'static str,
        /// Value to write.
        value: String,
    },
}

impl WriteAction {
    /// Perform the write.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error; for [`WriteAction::EachCpu`] the
    /// last per-CPU failure.
    pub fn execute(&self, reader: &dyn StateReader) -> Result<(), SysfsError> {
        match self {
            Self::Text { path, value } => reader.write_string(path, value),
            Self::Int { path, value } => reader.write_int64(path, *value),
            Self::EachCpu { attribute, value } => sysfs::write_each_cpu(reader, attribute, value),
        }
    }

    /// Representative path: the written path, or cpu0's copy of the attribute.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Text { path, .. } | Self::Int { path, .. } => path.clone(),
            Self::EachCpu { attribute, .. } => paths::cpufreq("cpu0", attribute),
        }
    }
}

/// One tunable that differs from its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    subsystem: Subsystem,
    parameter: String,
    old_value: String,
    new_value: String,
    raw_old: String,
    action: WriteAction,
}

impl Change {
    pub(crate) fn new(
        subsystem: Subsystem,
        parameter: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        action: WriteAction,
    ) -> Self {
        let old_value = old_value.into();
        Self {
            subsystem,
            parameter: parameter.into(),
            raw_old: old_value.clone(),
            old_value,
            new_value: new_value.into(),
            action,
        }
    }

    /// Override the value recorded in backups when the displayed old value
    /// is not what the kernel file holds (turbo shows `on`/`off`).
    pub(crate) fn with_raw_old(mut self, raw: impl Into<String>) -> Self {
        self.raw_old = raw.into();
        self
    }

    /// Subsystem tag.
    #[must_use]
    pub const fn subsystem(&self) -> Subsystem {
        self.subsystem
    }

    /// Human-readable parameter name.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Live value at diff time, as displayed.
    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Target value, as displayed.
    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    /// Live value at diff time, exactly as the kernel file expects it back.
    #[must_use]
    pub fn backup_value(&self) -> &str {
        &self.raw_old
    }

    /// Backing path recorded in backups.
    #[must_use]
    pub fn path(&self) -> String {
        self.action.path()
    }

    /// Write operation that applies this change.
    #[must_use]
    pub const fn action(&self) -> &WriteAction {
        &self.action
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {}", self.parameter, self.old_value, self.new_value)
    }
}

/// A subsystem left untouched, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suppression {
    /// Subsystem whose changes were dropped.
    pub subsystem: Subsystem,
    /// Why it was dropped.
    pub reason: String,
}

/// Result of diffing a snapshot against target values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Changes in apply order.
    pub changes: Vec<Change>,
    /// Subsystems deliberately left alone.
    pub suppressed: Vec<Suppression>,
}

impl Reconciliation {
    /// No changes to make.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Diff `snapshot` against `target`.
///
/// Changes are ordered CPU, memory, storage (per device in snapshot order),
/// network. Unobserved tunables produce no change. When the target defers
/// to a power daemon and that daemon is enabled, CPU changes are replaced by
/// a [`Suppression`].
#[must_use]
pub fn compute_changes(snapshot: &SystemSnapshot, target: &TargetValues) -> Reconciliation {
    let mut out = Reconciliation::default();

    let daemon = &snapshot.power.daemon;
    if target.skip_if_power_daemon && daemon.enabled {
        out.suppressed.push(Suppression {
            subsystem: Subsystem::Cpu,
            reason: format!("{}; it manages CPU power settings", daemon.describe()),
        });
    } else {
        cpu::diff(&snapshot.cpu, target, &mut out.changes);
    }
    memory::diff(&snapshot.memory, target, &mut out.changes);
    storage::diff(&snapshot.storage, target, &mut out.changes);
    network::diff(&snapshot.network, target, &mut out.changes);

    out
}

/// Map each change's backing path to the value it held before the change.
#[must_use]
pub fn backup_map(changes: &[Change]) -> BTreeMap<String, String> {
    changes
        .iter()
        .map(|c| (c.path(), c.backup_value().to_string()))
        .collect()
}

/// Push a change when an observed integer differs from its target.
fn diff_int(
    out: &mut Vec<Change>,
    subsystem: Subsystem,
    parameter: &str,
    path: &str,
    observed: Option<i64>,
    target: i64,
) {
    if let Some(current) = observed
        && current != target
    {
        out.push(Change::new(
            subsystem,
            parameter,
            current.to_string(),
            target.to_string(),
            WriteAction::Int {
                path: path.to_string(),
                value: target,
            },
        ));
    }
}

/// Push a change when an observed string differs from its target.
fn diff_text(
    out: &mut Vec<Change>,
    subsystem: Subsystem,
    parameter: &str,
    path: &str,
    observed: Option<&str>,
    target: &str,
) {
    if let Some(current) = observed.map(str::trim)
        && current != target
    {
        out.push(Change::new(
            subsystem,
            parameter,
            current,
            target,
            WriteAction::Text {
                path: path.to_string(),
                value: target.to_string(),
            },
        ));
    }
}
