//! Diagnostic logging for the `hearth` binary.
//!
//! Library code logs through `tracing` macros; this module installs the
//! subscriber. Output goes to stderr so stdout stays clean for command
//! results. The filter comes from `HEARTH_LOG` (`EnvFilter` syntax, e.g.
//! `hearth=debug`), falling back to `warn`, or `debug` when verbose.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HEARTH_LOG";

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::warn!("logging initialized");
    }
}
