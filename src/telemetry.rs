//! Structured logging setup for the headless front end.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Filter from `RUST_LOG` if set, otherwise from `level`
pub(crate) fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber once; later calls are ignored
///
/// Logs go to stderr so stdout stays reserved for render commands.
pub fn init_tracing(level: &str) {
    let _ = TRACING_INIT.get_or_init(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(build_filter(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing("debug");
        init_tracing("trace");
        tracing::info!("telemetry initialized");
    }

    #[test]
    fn invalid_level_falls_back() {
        // Invalid directives must not panic
        let _ = build_filter("not a [valid filter");
    }
}
