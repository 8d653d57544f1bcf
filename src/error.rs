//! Domain-specific error types for the tuning engine.
//!
//! Internal modules return typed errors (e.g., [`SysfsError`], [`BackupError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error types
//!
//! ```text
//! ProfileError    profile name parsing
//! SysfsError      tunable reads and writes
//! BackupError     backup document load/save
//! PlatformError   privilege checks
//! ConfigError     tuner.toml loading
//! ```
//!
//! Observation misses never surface here: the detection layer folds them into
//! absent snapshot fields, and apply failures are counted rather than raised.

use thiserror::Error;

/// Errors raised while resolving a profile requested by name.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileError {
    /// The requested profile is not one of the known profiles.
    #[error("Invalid profile '{0}': must be one of server, desktop, laptop")]
    InvalidProfile(String),
}

/// Errors raised by [`StateReader`](crate::sysfs::StateReader) primitives.
#[derive(Error, Debug)]
pub enum SysfsError {
    /// The path does not exist on this kernel or hardware.
    #[error("{path} does not exist")]
    NotFound {
        /// Virtual filesystem path that was accessed.
        path: String,
    },

    /// The path exists but could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Virtual filesystem path that was accessed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The path was read but its content could not be parsed.
    #[error("unexpected value in {path}: {value:?}")]
    Parse {
        /// Virtual filesystem path that was read.
        path: String,
        /// Raw (trimmed) content of the file.
        value: String,
    },
}

impl SysfsError {
    /// Build an error from an [`std::io::Error`], mapping `NotFound` to
    /// [`SysfsError::NotFound`].
    #[must_use]
    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_string(),
            }
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}

/// Errors raised by the backup store.
#[derive(Error, Debug)]
pub enum BackupError {
    /// No backup document exists.
    #[error("no backup found at {path}; nothing to reset")]
    Missing {
        /// Expected location of the backup document.
        path: String,
    },

    /// The backup document exists but cannot be parsed.
    #[error("backup at {path} is corrupt: {source}")]
    Corrupt {
        /// Location of the backup document.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The backup document could not be read, written, or removed.
    #[error("I/O error on backup {path}: {source}")]
    Io {
        /// Location of the backup document.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from platform-specific checks.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlatformError {
    /// A mutating command was invoked without root privileges.
    #[error("'{command}' requires root privileges; run with sudo")]
    PrivilegeRequired {
        /// Name of the command that was refused.
        command: String,
    },
}

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading the configuration file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
