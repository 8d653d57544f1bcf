//! Command: print version information.

/// Version string, preferring the build-time `TUNER_VERSION`.
#[must_use]
pub fn version() -> &'static str {
    option_env!("TUNER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the tuner version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("tuner {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().trim().is_empty());
    }
}
