//! Ask sysctl and udev to pick up changed drop-ins.
use anyhow::Result;

use crate::exec::Executor;

/// Reload hooks run after drop-ins change.
pub trait Reloader {
    /// Re-read every sysctl drop-in (`sysctl --system`).
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    fn reload_sysctl(&self) -> Result<()>;

    /// Reload udev rules and re-trigger devices.
    ///
    /// # Errors
    ///
    /// Returns an error if either `udevadm` call fails.
    fn reload_udev(&self) -> Result<()>;
}

/// [`Reloader`] that shells out to `sysctl` and `udevadm`.
pub struct SystemReloader<'a> {
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for SystemReloader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemReloader").finish_non_exhaustive()
    }
}

impl<'a> SystemReloader<'a> {
    /// Reloader backed by `executor`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }
}

impl Reloader for SystemReloader<'_> {
    fn reload_sysctl(&self) -> Result<()> {
        self.executor.run("sysctl", &["--system"])?;
        Ok(())
    }

    fn reload_udev(&self) -> Result<()> {
        self.executor.run("udevadm", &["control", "--reload-rules"])?;
        self.executor.run("udevadm", &["trigger"])?;
        Ok(())
    }
}
