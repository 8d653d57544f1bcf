//! Log file location, colour stripping and timestamps.
use std::fs;
use std::path::PathBuf;

/// Remove the SGR colour sequences (`ESC [ ... m`) the console formatter and
/// the summary emit.
pub(super) fn strip_colors(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((before, after)) = rest.split_once("\x1b[") {
        out.push_str(before);
        rest = after.split_once('m').map_or("", |(_, tail)| tail);
    }
    out.push_str(rest);
    out
}

/// `$XDG_CACHE_HOME/tuner/<command>.log`, falling back to `$HOME/.cache`.
///
/// Under `sudo` this is usually root's cache. Returns `None` when neither
/// variable is set or the directory cannot be created; the run then logs to
/// the console only.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = cache.join("tuner");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Run start time for the log header, RFC 3339 in UTC.
pub(super) fn started_at() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Wall-clock prefix for each log line, `HH:MM:SS` in UTC.
pub(super) fn clock() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
