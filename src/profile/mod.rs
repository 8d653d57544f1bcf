//! Machine profiles and their target values.
pub mod classify;
pub mod values;

use std::fmt;
use std::str::FromStr;

pub use classify::classify;
pub use values::TargetValues;

use crate::detect::power;
use crate::error::ProfileError;
use crate::sysfs::StateReader;

/// Machine role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileType {
    /// Headless throughput-oriented host.
    Server,
    /// Interactive workstation on mains power.
    Desktop,
    /// Battery-capable machine.
    Laptop,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Desktop => write!(f, "desktop"),
            Self::Laptop => write!(f, "laptop"),
        }
    }
}

impl FromStr for ProfileType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "desktop" => Ok(Self::Desktop),
            "laptop" => Ok(Self::Laptop),
            _ => Err(ProfileError::InvalidProfile(s.to_string())),
        }
    }
}

/// Power source. Only meaningful for laptops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    /// Mains power.
    #[default]
    Ac,
    /// Running from battery.
    Battery,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ac => write!(f, "ac"),
            Self::Battery => write!(f, "battery"),
        }
    }
}

impl PowerState {
    /// Current power source according to `/sys/class/power_supply`.
    #[must_use]
    pub fn detect(reader: &dyn StateReader) -> Self {
        if power::supply_state(reader).on_battery {
            Self::Battery
        } else {
            Self::Ac
        }
    }
}

/// A resolved profile: role, power source and target values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Machine role.
    pub kind: ProfileType,
    /// Power source (always AC for non-laptops).
    pub power: PowerState,
    /// Target table for this role and power source.
    pub values: TargetValues,
}

impl Profile {
    /// Build a profile. `power` is forced to AC for non-laptop roles.
    #[must_use]
    pub const fn new(kind: ProfileType, power: PowerState) -> Self {
        let power = match kind {
            ProfileType::Laptop => power,
            ProfileType::Server | ProfileType::Desktop => PowerState::Ac,
        };
        Self {
            kind,
            power,
            values: TargetValues::for_profile(kind, power),
        }
    }

    /// Profile for an explicitly chosen role; power state is detected for
    /// laptops.
    #[must_use]
    pub fn for_type(kind: ProfileType, reader: &dyn StateReader) -> Self {
        let power = match kind {
            ProfileType::Laptop => PowerState::detect(reader),
            ProfileType::Server | ProfileType::Desktop => PowerState::Ac,
        };
        Self::new(kind, power)
    }

    /// Name recorded in backups, e.g. `laptop` or `laptop (battery)`.
    #[must_use]
    pub fn name(&self) -> String {
        match self.power {
            PowerState::Battery => format!("{} (battery)", self.kind),
            PowerState::Ac => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProfileType::Laptop => write!(f, "{} ({})", self.kind, self.power),
            ProfileType::Server | ProfileType::Desktop => write!(f, "{}", self.kind),
        }
    }
}
