//! On-disk record of pre-change values, and the restore pass that replays it.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BackupError;
use crate::logging::{ChangeStatus, Log};
use crate::sysfs::{self, StateReader, paths};

/// Default backup location.
pub const DEFAULT_BACKUP_PATH: &str = "/etc/tuner/backup.json";

/// Original tunable values captured before tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// RFC 3339 time the backup was written.
    pub timestamp: String,
    /// Profile name the changes were computed for.
    pub profile: String,
    /// Path to original value.
    pub values: BTreeMap<String, String>,
}

/// JSON backup file at a fixed path.
#[derive(Debug, Clone)]
pub struct BackupStore {
    path: PathBuf,
}

impl BackupStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backup file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a fresh record, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Io`] if the directory or file cannot be written.
    pub fn save(
        &self,
        profile: &str,
        values: BTreeMap<String, String>,
    ) -> Result<BackupRecord, BackupError> {
        let record = BackupRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            profile: profile.to_string(),
            values,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&record).map_err(|e| self.io_error(e.into()))?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        Ok(record)
    }

    /// Read the record.
    ///
    /// # Errors
    ///
    /// [`BackupError::Missing`] when there is no file, [`BackupError::Corrupt`]
    /// when it does not parse, [`BackupError::Io`] otherwise.
    pub fn load(&self) -> Result<BackupRecord, BackupError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BackupError::Missing {
                    path: self.display_path(),
                }
            } else {
                self.io_error(e)
            }
        })?;
        serde_json::from_str(&content).map_err(|source| BackupError::Corrupt {
            path: self.display_path(),
            source,
        })
    }

    /// Whether a backup file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Delete the backup file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Io`] if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<(), BackupError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(self.io_error(e)),
            _ => Ok(()),
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: io::Error) -> BackupError {
        BackupError::Io {
            path: self.display_path(),
            source,
        }
    }
}

/// Counts from one restore pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Values written back.
    pub restored: usize,
    /// Paths that no longer exist.
    pub skipped: usize,
    /// Writes that failed.
    pub failed: usize,
}

/// Write every recorded value back.
///
/// Vanished paths are skipped and failed writes are counted; neither stops
/// the pass. cpu0 cpufreq attributes are restored on every CPU, mirroring
/// how they were applied.
#[must_use]
pub fn restore(record: &BackupRecord, reader: &dyn StateReader, log: &dyn Log) -> RestoreOutcome {
    let mut outcome = RestoreOutcome::default();
    let cpu0_prefix = format!("{}/cpu0/cpufreq/", paths::CPU_BASE);

    for (path, value) in &record.values {
        if !reader.exists(path) {
            log.debug(&format!("{path} no longer exists, skipping"));
            log.record_change(path, ChangeStatus::Skipped, Some("path vanished"));
            outcome.skipped += 1;
            continue;
        }

        let written = match path.strip_prefix(&cpu0_prefix) {
            Some(attribute) => sysfs::write_each_cpu(reader, attribute, value),
            None => reader.write_string(path, value),
        };
        match written {
            Ok(()) => {
                log.info(&format!("{path} → {value}"));
                log.record_change(path, ChangeStatus::Applied, Some(value));
                outcome.restored += 1;
            }
            Err(e) => {
                log.error(&format!("{path}: {e}"));
                log.record_change(path, ChangeStatus::Failed, Some(&e.to_string()));
                outcome.failed += 1;
            }
        }
    }

    outcome
}
