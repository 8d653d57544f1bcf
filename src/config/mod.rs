//! Tool configuration (`/etc/tuner/tuner.toml`).
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::persist::backup::DEFAULT_BACKUP_PATH;
use crate::persist::dropin::{DEFAULT_SYSCTL_PATH, DEFAULT_UDEV_PATH};

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tuner/tuner.toml";

/// Artifact locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Backup JSON file.
    pub backup: PathBuf,
    /// sysctl drop-in.
    pub sysctl_dropin: PathBuf,
    /// udev rules file.
    pub udev_rules: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            backup: PathBuf::from(DEFAULT_BACKUP_PATH),
            sysctl_dropin: PathBuf::from(DEFAULT_SYSCTL_PATH),
            udev_rules: PathBuf::from(DEFAULT_UDEV_PATH),
        }
    }
}

/// Power daemon settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerConfig {
    /// Service whose enablement defers CPU tuning on laptops.
    pub daemon: String,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            daemon: "tlp".to_string(),
        }
    }
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Artifact locations.
    pub paths: PathsConfig,
    /// Power daemon settings.
    pub power: PowerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` is used verbatim; otherwise the default location is looked
    /// up beneath `root`. Artifact paths are then re-based under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map_or_else(
            || rebase(root, Path::new(DEFAULT_CONFIG_PATH)),
            Path::to_path_buf,
        );
        tracing::debug!("loading config from {}", path.display());
        let config: Self = toml_loader::load_config(&path)?;
        Ok(config.rebased(root))
    }

    /// Re-base every absolute artifact path beneath `root`.
    #[must_use]
    pub fn rebased(mut self, root: &Path) -> Self {
        self.paths.backup = rebase(root, &self.paths.backup);
        self.paths.sysctl_dropin = rebase(root, &self.paths.sysctl_dropin);
        self.paths.udev_rules = rebase(root, &self.paths.udev_rules);
        self
    }
}

/// Join an absolute path beneath `root` (`/` leaves it unchanged).
fn rebase(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix("/")
        .map_or_else(|_| path.to_path_buf(), |rel| root.join(rel))
}
