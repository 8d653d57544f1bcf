//! Command: show the detected profile.
use anyhow::Result;

use super::Host;
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::profile::{Profile, ProfileType};

/// Run the profile command.
///
/// # Errors
///
/// Returns an error if the host cannot be initialised.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let host = Host::init(global, Platform::detect(), log)?;
    let profile = execute(&host, log);
    println!("Detected profile: \x1b[1;32m{}\x1b[0m", profile.kind);
    if profile.kind == ProfileType::Laptop {
        println!("Power state: {}", profile.power);
    }
    Ok(())
}

/// Classify the host and log the outcome.
#[must_use]
pub fn execute(host: &Host, log: &dyn Log) -> Profile {
    let profile = host.classify();
    log.debug(&format!("classified as {profile}"));
    profile
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_helpers;
    use crate::detect::test_helpers::FakeRoot;
    use crate::exec::test_helpers::MockExecutor;
    use crate::logging::RecordingLog;
    use crate::profile::PowerState;
    use crate::sysfs::paths;

    #[test]
    fn rack_chassis_is_a_server() {
        let root = FakeRoot::new();
        root.put(paths::CHASSIS_TYPE, "23\n");
        let host = test_helpers::host(&root, MockExecutor::with_responses(vec![]));
        let profile = execute(&host, &RecordingLog::default());
        assert_eq!(profile.kind, ProfileType::Server);
    }

    #[test]
    fn unplugged_laptop_reports_battery() {
        let root = FakeRoot::new();
        root.put("/sys/class/power_supply/BAT0/status", "Discharging\n")
            .put("/sys/class/power_supply/AC/online", "0\n");
        let host = test_helpers::host(&root, MockExecutor::with_responses(vec![]));
        let log = RecordingLog::default();
        let profile = execute(&host, &log);
        assert_eq!(profile.kind, ProfileType::Laptop);
        assert_eq!(profile.power, PowerState::Battery);
        assert_eq!(log.lines(), vec!["debug: classified as laptop (battery)"]);
    }
}
