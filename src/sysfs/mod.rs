//! Read/write primitives over the kernel's virtual filesystems.
//!
//! [`StateReader`] is the only way the engine touches `/sys` and `/proc`.
//! [`SysFs`] implements it against a root directory (normally `/`), which
//! lets tests point the whole engine at a temporary directory tree.
pub mod paths;

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::SysfsError;

/// Typed access to sysfs/procfs style paths.
///
/// Paths are absolute virtual-filesystem paths such as
/// `/proc/sys/vm/swappiness`. Every read trims surrounding whitespace.
/// Writes must be idempotent: writing the value a file already holds is not
/// an error.
#[cfg_attr(test, mockall::automock)]
pub trait StateReader {
    /// Read a file and return its trimmed content.
    ///
    /// # Errors
    ///
    /// Returns [`SysfsError::NotFound`] when the path is absent and
    /// [`SysfsError::Io`] when it cannot be read.
    fn read_string(&self, path: &str) -> Result<String, SysfsError>;

    /// Write `value` to an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`SysfsError::NotFound`] when the path is absent and
    /// [`SysfsError::Io`] when the kernel rejects the write.
    fn write_string(&self, path: &str, value: &str) -> Result<(), SysfsError>;

    /// Return `true` if the path exists.
    fn exists(&self, path: &str) -> bool;

    /// List entry names of a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is absent or unreadable.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, SysfsError>;

    /// Read a file and parse it as an integer.
    ///
    /// # Errors
    ///
    /// Propagates read errors; returns [`SysfsError::Parse`] for non-numeric content.
    fn read_int(&self, path: &str) -> Result<i64, SysfsError> {
        let raw = self.read_string(path)?;
        raw.parse().map_err(|_| SysfsError::Parse {
            path: path.to_string(),
            value: raw,
        })
    }

    /// Read a selector file and return the active entry, e.g.
    /// `always [madvise] never` yields `madvise`.
    ///
    /// Content without brackets is returned unchanged.
    ///
    /// # Errors
    ///
    /// Propagates read errors.
    fn read_bracketed(&self, path: &str) -> Result<String, SysfsError> {
        let raw = self.read_string(path)?;
        Ok(bracketed_value(&raw).unwrap_or(&raw).to_string())
    }

    /// Write an integer value.
    ///
    /// # Errors
    ///
    /// See [`StateReader::write_string`].
    fn write_int(&self, path: &str, value: i32) -> Result<(), SysfsError> {
        self.write_string(path, &value.to_string())
    }

    /// Write a 64-bit integer value.
    ///
    /// # Errors
    ///
    /// See [`StateReader::write_string`].
    fn write_int64(&self, path: &str, value: i64) -> Result<(), SysfsError> {
        self.write_string(path, &value.to_string())
    }
}

/// Extract the bracketed entry of a selector string.
fn bracketed_value(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.find(']')?;
    raw.get(start + 1..end)
}

/// [`StateReader`] backed by the real filesystem beneath `root`.
#[derive(Debug, Clone)]
pub struct SysFs {
    root: PathBuf,
}

impl SysFs {
    /// Create a reader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reader for the running host (`/`).
    #[must_use]
    pub fn host() -> Self {
        Self::new("/")
    }

    /// Root directory all paths are resolved beneath.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl StateReader for SysFs {
    fn read_string(&self, path: &str) -> Result<String, SysfsError> {
        fs::read_to_string(self.resolve(path))
            .map(|s| s.trim().to_string())
            .map_err(|e| SysfsError::from_io(path, e))
    }

    fn write_string(&self, path: &str, value: &str) -> Result<(), SysfsError> {
        // Never create files: a missing node means the tunable is unsupported.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.resolve(path))
            .map_err(|e| SysfsError::from_io(path, e))?;
        file.write_all(value.as_bytes())
            .map_err(|e| SysfsError::from_io(path, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, SysfsError> {
        let entries = fs::read_dir(self.resolve(path)).map_err(|e| SysfsError::from_io(path, e))?;
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Write a cpufreq attribute on every `cpuN` that exposes it.
///
/// All CPUs are attempted; the last write error (if any) is returned.
///
/// # Errors
///
/// Returns the last failed write, or [`SysfsError::NotFound`] if no CPU
/// exposes the attribute.
pub fn write_each_cpu(
    reader: &dyn StateReader,
    attribute: &str,
    value: &str,
) -> Result<(), SysfsError> {
    let mut written = 0usize;
    let mut last_err = None;
    for cpu in reader.list_dir(paths::CPU_BASE)? {
        if !is_cpu_dir(&cpu) {
            continue;
        }
        let path = paths::cpufreq(&cpu, attribute);
        if !reader.exists(&path) {
            continue;
        }
        match reader.write_string(&path, value) {
            Ok(()) => written += 1,
            Err(e) => last_err = Some(e),
        }
    }
    if let Some(e) = last_err {
        return Err(e);
    }
    if written == 0 {
        return Err(SysfsError::NotFound {
            path: paths::cpufreq("cpu*", attribute),
        });
    }
    Ok(())
}

/// `cpu0`, `cpu12`, … but not `cpufreq` or `cpuidle`.
fn is_cpu_dir(name: &str) -> bool {
    name.strip_prefix("cpu")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
