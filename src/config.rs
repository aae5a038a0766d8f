//! Ambient configuration: application constants, default logging filter, and
//! the environment variables named in spec §6.6. Plain functions over typed
//! values, no configuration-file framework — this crate never parses config
//! files itself (that's an explicit Non-goal, §1); a host embeds it and
//! supplies a [`crate::policy::Policy`] directly.

use std::path::PathBuf;

pub const APP_NAME: &str = "vulpes-redact";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default env filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// `VULPES_POLICY_DEFAULT` — path to a policy JSON file used when the
/// caller doesn't supply one explicitly (CLI surface, §6.4).
pub fn policy_default_path() -> Option<PathBuf> {
    std::env::var_os("VULPES_POLICY_DEFAULT").map(PathBuf::from)
}

/// `VULPES_HMAC_KEY` — overrides `policy.hmac_key` when set.
pub fn hmac_key_override() -> Option<String> {
    std::env::var("VULPES_HMAC_KEY").ok()
}

/// `VULPES_DISABLE_ACCEL` — disables native detector accelerators for parity
/// testing. The reference implementation here has no separate "accelerated"
/// detector path, so this only gates whether detectors may use the parallel
/// runner (C4) at all; with it set, the runner collapses to sequential
/// execution, which spec §5 explicitly allows ("free to collapse to
/// sequential execution without changing observable behaviour").
pub fn accel_disabled() -> bool {
    std::env::var_os("VULPES_DISABLE_ACCEL").is_some()
}

/// Default cap on total spans per document (spec §5, `maxSpansPerDoc`).
pub const DEFAULT_MAX_SPANS_PER_DOC: usize = 100_000;

/// Default cap on input size in bytes before `InputTooLarge` is raised.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 32 * 1024 * 1024;

/// Default age cap for the AGE_OVER_89 family of detections (Safe Harbor).
pub const DEFAULT_AGE_CAP: u32 = 89;

/// Paragraph-split threshold above which the parallel detector runner (C4)
/// splits input and stitches detector results back together (spec §4.3).
pub const DEFAULT_PARAGRAPH_SPLIT_BYTES: usize = 64 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_vulpes() {
        assert_eq!(APP_NAME, "vulpes-redact");
    }

    #[test]
    fn default_log_filter_is_info() {
        assert_eq!(default_log_filter(), "info");
    }

    #[test]
    fn env_accessors_absent_by_default() {
        // CI/test environments shouldn't have these set; if they are, this
        // test documents the override behaviour rather than asserting None.
        let _ = policy_default_path();
        let _ = hmac_key_override();
        let _ = accel_disabled();
    }

    #[test]
    fn default_caps_are_positive() {
        assert!(DEFAULT_MAX_SPANS_PER_DOC > 0);
        assert!(DEFAULT_MAX_DOCUMENT_BYTES > 0);
        assert!(DEFAULT_AGE_CAP > 0);
    }
}
