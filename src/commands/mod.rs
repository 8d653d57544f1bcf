//! Command implementations and the host setup they share.
//!
//! Every command has a `run` entry point that wires real collaborators and an
//! `execute` function that tests drive with a fake root.
pub mod apply;
pub mod profile;
pub mod reset;
pub mod save;
pub mod version;

use std::io::{self, BufRead as _, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result, bail};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::detect::{SystemSignals, SystemSnapshot};
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::persist::{BackupStore, DropIns};
use crate::platform::Platform;
use crate::profile::{Profile, ProfileType};
use crate::sysfs::SysFs;

/// Shared state produced by the common command setup sequence.
///
/// Bundles the filesystem root, process runner, platform and configuration
/// so that each command does not repeat the boilerplate.
pub struct Host {
    /// Tunable reader/writer rooted at `--root` (or `/`).
    pub reader: SysFs,
    /// Runner for `systemctl`, `sysctl` and `udevadm`.
    pub executor: Box<dyn Executor>,
    /// Platform of the running process.
    pub platform: Platform,
    /// Loaded configuration with artifact paths re-based under the root.
    pub config: Config,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("reader", &self.reader)
            .field("platform", &self.platform)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Host {
    /// Load configuration for `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error on non-Linux platforms or if the configuration file
    /// cannot be parsed.
    pub fn init(global: &GlobalOpts, platform: Platform, log: &dyn Log) -> Result<Self> {
        if !platform.is_linux() {
            bail!("tuner manages Linux kernel tunables; {} is not supported", platform.os);
        }

        let reader = global.root.as_ref().map_or_else(SysFs::host, SysFs::new);
        log.debug(&format!("root: {}", reader.root().display()));

        let config = Config::load(reader.root(), global.config.as_deref())?;
        log.debug(&format!("backup: {}", config.paths.backup.display()));
        log.debug(&format!("power daemon: {}", config.power.daemon));

        Ok(Self::with_parts(
            reader,
            Box::new(SystemExecutor),
            platform,
            config,
        ))
    }

    /// Refuse to run `command` without root, then [`init`](Self::init).
    ///
    /// Nothing is read from the filesystem before the privilege check.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::PrivilegeRequired`](crate::error::PlatformError)
    /// when not root, otherwise any error from [`init`](Self::init).
    pub fn init_as_root(
        global: &GlobalOpts,
        platform: Platform,
        command: &str,
        log: &dyn Log,
    ) -> Result<Self> {
        platform.require_root(command)?;
        Self::init(global, platform, log)
    }

    /// Assemble a host from explicit parts.
    #[must_use]
    pub fn with_parts(
        reader: SysFs,
        executor: Box<dyn Executor>,
        platform: Platform,
        config: Config,
    ) -> Self {
        Self {
            reader,
            executor,
            platform,
            config,
        }
    }

    /// Filesystem root every path is resolved beneath.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.reader.root()
    }

    /// Resolve the profile from `--profile`, or classify the host.
    ///
    /// # Errors
    ///
    /// Returns an error if `requested` is not a known profile name.
    pub fn resolve_profile(&self, requested: Option<&str>, log: &dyn Log) -> Result<Profile> {
        if let Some(name) = requested {
            let kind: ProfileType = name.parse()?;
            log.debug(&format!("profile {kind} requested explicitly"));
            return Ok(Profile::for_type(kind, &self.reader));
        }

        let detected = self.classify();
        log.debug(&format!("profile {detected} detected"));
        Ok(detected)
    }

    /// Classify the host from hardware and systemd signals.
    #[must_use]
    pub fn classify(&self) -> Profile {
        let signals = SystemSignals::new(self.executor.as_ref());
        crate::profile::classify(&self.reader, &signals)
    }

    /// Read the current value of every managed tunable.
    #[must_use]
    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::detect(
            &self.reader,
            self.executor.as_ref(),
            &self.config.power.daemon,
        )
    }

    /// Backup store at the configured location.
    #[must_use]
    pub fn backup_store(&self) -> BackupStore {
        BackupStore::new(&self.config.paths.backup)
    }

    /// Drop-in artifacts at the configured locations.
    #[must_use]
    pub fn drop_ins(&self) -> DropIns {
        DropIns::new(
            &self.config.paths.sysctl_dropin,
            &self.config.paths.udev_rules,
        )
    }
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed or stdin cannot be read.
#[allow(clippy::print_stdout)]
pub fn prompt_confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("flushing stdout")?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("reading confirmation")?;
    Ok(is_affirmative(&input))
}

/// Whether a prompt answer means yes.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
