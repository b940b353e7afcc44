//! Process-wide `tracing` setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Installs a formatted subscriber filtered by `RUST_LOG`, or by
/// `default_directive` when the variable is unset or invalid.
///
/// Safe to call more than once; later calls are no-ops and return `false`.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(directive = default_directive, "Logging initialized");
    }
    installed
}

/// Directive used by the CLI binaries: quiet dependencies, `info` for our crates.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    ["data_pipeline", "planning_engine", "data_normalization", "settings_loader", "logger", "advise", "goal_calc"]
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        let quiet = default_directive(false);
        assert!(quiet.contains("planning_engine=info"));
        assert!(quiet.ends_with(",warn"));
        assert!(default_directive(true).contains("data_pipeline=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init("warn");
        assert!(!init("debug"));
    }
}
