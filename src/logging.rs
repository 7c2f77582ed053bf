//! Diagnostic logging
//!
//! stdout is the MCP channel, so diagnostics go to stderr and only when the
//! `DEBUG` environment variable is set to a non-empty value. Without it no
//! subscriber is installed and every `tracing` event is dropped.

use tracing_subscriber::EnvFilter;

/// Environment variable that turns logging on
pub const DEBUG_ENV: &str = "DEBUG";

/// True when the given `DEBUG` value enables logging
pub fn is_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Read `DEBUG` from the environment
pub fn debug_enabled() -> bool {
    is_enabled(std::env::var(DEBUG_ENV).ok().as_deref())
}

/// Install the stderr subscriber when enabled. `RUST_LOG` refines the
/// filter; the default level is `debug`.
pub fn init(enabled: bool) {
    if !enabled {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_enabled() {
        assert!(is_enabled(Some("1")));
        assert!(is_enabled(Some("true")));
        assert!(!is_enabled(Some("")));
        assert!(!is_enabled(None));
    }
}
