//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the caller.

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const ENV_VAR: &str = "HAUL_LOG";

/// Install a stderr subscriber.
///
/// The filter comes from `HAUL_LOG`, then `fallback` (the configured
/// level), then `warn`. Returns `false` when a subscriber was already
/// installed, in which case that one stays in place.
pub fn init(fallback: Option<&str>) -> bool {
    let installed = fmt()
        .with_env_filter(filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok();
    if !installed {
        debug!("subscriber already installed, keeping it");
    }
    installed
}

fn filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(ENV_VAR)
        .or_else(|_| EnvFilter::try_new(fallback.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fallback_degrades_to_warn() {
        // Only meaningful when the variable is unset, as in CI.
        if std::env::var_os(ENV_VAR).is_none() {
            assert_eq!(filter(Some("haul=loud")).to_string(), "warn");
            assert_eq!(filter(Some("debug")).to_string(), "debug");
            assert_eq!(filter(None).to_string(), "warn");
        }
    }

    #[test]
    fn second_init_keeps_first_subscriber() {
        init(Some("warn"));
        assert!(!init(None));
    }
}
