//! Automatic profile selection.
use super::{PowerState, Profile, ProfileType};
use crate::detect::{HostSignals, power};
use crate::sysfs::{StateReader, paths};

/// DMI chassis types of rack, tower and multi-node server enclosures.
const SERVER_CHASSIS: &[i64] = &[17, 23, 25, 28, 29];
/// DMI chassis types of portable machines.
const LAPTOP_CHASSIS: &[i64] = &[8, 9, 10, 14, 31, 32];

const MULTI_USER_TARGET: &str = "multi-user.target";

/// Pick the profile for this host.
///
/// Signals are evaluated in strict priority order:
/// 1. a battery supply means laptop;
/// 2. the DMI chassis type, when it names a server or portable enclosure;
/// 3. no graphical session and `multi-user.target` as default means server;
/// 4. otherwise desktop.
///
/// Unreadable signals count as absent, so classification never fails.
#[must_use]
pub fn classify(reader: &dyn StateReader, signals: &dyn HostSignals) -> Profile {
    let supplies = power::supply_state(reader);
    let on_battery = if supplies.on_battery {
        PowerState::Battery
    } else {
        PowerState::Ac
    };

    if supplies.has_battery {
        tracing::debug!("battery present: laptop");
        return Profile::new(ProfileType::Laptop, on_battery);
    }

    if let Ok(chassis) = reader.read_int(paths::CHASSIS_TYPE) {
        if SERVER_CHASSIS.contains(&chassis) {
            tracing::debug!("chassis type {chassis}: server");
            return Profile::new(ProfileType::Server, PowerState::Ac);
        }
        if LAPTOP_CHASSIS.contains(&chassis) {
            tracing::debug!("chassis type {chassis}: laptop");
            return Profile::new(ProfileType::Laptop, on_battery);
        }
    }

    if !signals.has_display() && signals.default_target().as_deref() == Some(MULTI_USER_TARGET) {
        tracing::debug!("headless with {MULTI_USER_TARGET}: server");
        return Profile::new(ProfileType::Server, PowerState::Ac);
    }

    Profile::new(ProfileType::Desktop, PowerState::Ac)
}
