//! Operating system and privilege detection for the running process.
use std::fmt;

use crate::error::PlatformError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux (the only platform with tunables to manage).
    Linux,
    /// Anything else.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Platform information for the current process.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// Effective UID, if it could be determined.
    pub euid: Option<u32>,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            euid: Self::detect_euid(),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, euid: Option<u32>) -> Self {
        Self { os, euid }
    }

    /// Whether the platform is Linux.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    /// Whether the process runs with an effective UID of 0.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.euid == Some(0)
    }

    /// Fail fast unless running as root.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::PrivilegeRequired`] naming `command`.
    pub fn require_root(&self, command: &str) -> Result<(), PlatformError> {
        if self.is_root() {
            Ok(())
        } else {
            Err(PlatformError::PrivilegeRequired {
                command: command.to_string(),
            })
        }
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "linux") {
            Os::Linux
        } else {
            Os::Other
        }
    }

    fn detect_euid() -> Option<u32> {
        std::fs::read_to_string(crate::sysfs::paths::PROC_SELF_STATUS)
            .ok()
            .and_then(|status| parse_euid(&status))
    }
}

/// Extract the effective UID from `/proc/<pid>/status` content.
///
/// The `Uid:` line lists real, effective, saved and filesystem UIDs.
fn parse_euid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|ids| ids.split_whitespace().nth(1))
        .and_then(|id| id.parse().ok())
}
