//! CPU frequency scaling state: governor, EPP and turbo boost.
use super::{observe_int, observe_string};
use crate::sysfs::{StateReader, paths};

/// Control surface through which turbo boost is exposed.
///
/// Resolved once per run. When both surfaces exist the inverted
/// `intel_pstate/no_turbo` flag is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurboSurface {
    /// `1` disables turbo (`intel_pstate/no_turbo`).
    InvertedFlag(String),
    /// `1` enables turbo (`cpufreq/boost`).
    DirectFlag(String),
}

impl TurboSurface {
    /// Path backing this surface.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::InvertedFlag(path) | Self::DirectFlag(path) => path,
        }
    }

    /// Short label used in change descriptions.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvertedFlag(_) => "no_turbo",
            Self::DirectFlag(_) => "boost",
        }
    }

    /// Translate a raw flag into "turbo enabled".
    #[must_use]
    pub const fn decode(&self, raw: i64) -> bool {
        match self {
            Self::InvertedFlag(_) => raw == 0,
            Self::DirectFlag(_) => raw == 1,
        }
    }

    /// Translate "turbo enabled" into this surface's raw flag.
    #[must_use]
    pub const fn encode(&self, enabled: bool) -> &'static str {
        match (self, enabled) {
            (Self::InvertedFlag(_), true) | (Self::DirectFlag(_), false) => "0",
            (Self::InvertedFlag(_), false) | (Self::DirectFlag(_), true) => "1",
        }
    }
}

/// Observed turbo state on a specific surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurboState {
    /// Surface the value was read from.
    pub surface: TurboSurface,
    /// Raw flag value as read.
    pub raw: i64,
}

impl TurboState {
    /// Whether turbo is currently enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.surface.decode(self.raw)
    }
}

/// CPU scaling tunables (read from cpu0).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuState {
    /// `scaling_governor`.
    pub governor: Option<String>,
    /// `energy_performance_preference`, absent on older drivers.
    pub epp: Option<String>,
    /// Turbo boost flag, if either surface exists.
    pub turbo: Option<TurboState>,
}

/// Read CPU scaling state.
#[must_use]
pub fn detect(reader: &dyn StateReader) -> CpuState {
    CpuState {
        governor: observe_string(reader, paths::CPU_GOVERNOR),
        epp: observe_string(reader, paths::CPU_EPP),
        turbo: detect_turbo(reader),
    }
}

fn detect_turbo(reader: &dyn StateReader) -> Option<TurboState> {
    let surface = if reader.exists(paths::INTEL_NO_TURBO) {
        TurboSurface::InvertedFlag(paths::INTEL_NO_TURBO.to_string())
    } else if reader.exists(paths::CPU_BOOST) {
        TurboSurface::DirectFlag(paths::CPU_BOOST.to_string())
    } else {
        return None;
    };
    let raw = observe_int(reader, surface.path())?;
    Some(TurboState { surface, raw })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detect::test_helpers::FakeRoot;

    #[test]
    fn inverted_surface_preferred_when_both_exist() {
        let root = FakeRoot::new();
        root.put(paths::INTEL_NO_TURBO, "1\n").put(paths::CPU_BOOST, "1\n");
        let turbo = detect(&root.sysfs()).turbo.unwrap();
        assert_eq!(
            turbo.surface,
            TurboSurface::InvertedFlag(paths::INTEL_NO_TURBO.to_string())
        );
        assert!(!turbo.enabled());
    }

    #[test]
    fn direct_surface_used_without_intel_pstate() {
        let root = FakeRoot::new();
        root.put(paths::CPU_BOOST, "1\n");
        let turbo = detect(&root.sysfs()).turbo.unwrap();
        assert_eq!(turbo.surface.label(), "boost");
        assert!(turbo.enabled());
    }

    #[test]
    fn unreadable_turbo_flag_is_unobserved() {
        let root = FakeRoot::new();
        root.put(paths::INTEL_NO_TURBO, "garbage\n").put(paths::CPU_BOOST, "1\n");
        assert!(detect(&root.sysfs()).turbo.is_none());
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let surfaces = [
            TurboSurface::InvertedFlag(String::new()),
            TurboSurface::DirectFlag(String::new()),
        ];
        for surface in surfaces {
            for enabled in [true, false] {
                let raw: i64 = surface.encode(enabled).parse().unwrap();
                assert_eq!(surface.decode(raw), enabled, "{surface:?} {enabled}");
            }
        }
    }

    #[test]
    fn missing_epp_is_unobserved() {
        let root = FakeRoot::new();
        root.put(paths::CPU_GOVERNOR, "schedutil\n");
        let cpu = detect(&root.sysfs());
        assert_eq!(cpu.governor.as_deref(), Some("schedutil"));
        assert!(cpu.epp.is_none());
        assert!(cpu.turbo.is_none());
    }
}
