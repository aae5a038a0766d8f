//! Tracing initialisation for hosts embedding this crate (spec §6.6 ambient
//! logging). A library crate should never install a global subscriber on
//! its own; [`init`] exists for the CLI binary and for tests that want
//! output, following the same `EnvFilter`-over-`RUST_LOG` convention the
//! host application this engine was extracted from uses.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`crate::config::default_log_filter`] when unset. Safe to call more than
/// once; later calls are no-ops (`tracing_subscriber::fmt().try_init()`
/// fails silently if a subscriber is already installed).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(crate::config::default_log_filter())),
        )
        .try_init();
}
