//! Policy model (spec §3.4) and wire format (spec §6.2).
//!
//! A [`Policy`] is immutable once constructed. Unknown JSON keys are
//! rejected during parsing rather than silently ignored, matching §6.2's
//! "Unknown keys are rejected (`InvalidPolicy`)".

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::PolicyError;
use crate::span::FilterType;

/// Pre-selected thresholds and filter set (spec §3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    HipaaStrict,
    HipaaLimitedDataset,
    Development,
}

/// How a final span is turned into replacement text (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementStrategy {
    CategoryToken,
    ConsistentPseudonym,
    Stars,
    TagAndCount,
}

/// The horizon over which replacement tokens are consistent (spec §4.5, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    PerDocument,
    PerSession,
    PerPolicy,
}

/// Immutable policy configuration (spec §3.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    pub profile: Profile,
    /// If present, only these filter types run; others are disabled
    /// entirely (`DetectorSkipped`, never faulted).
    pub enabled_filters: Option<HashSet<FilterType>>,
    /// Minimum confidence per category for a span to survive post-filtering.
    /// Categories absent from the map use `default_threshold`.
    pub sensitivity_threshold: BTreeMap<FilterType, f32>,
    pub default_threshold: f32,
    /// If true, dates are kept as year-only (Limited Dataset Safe Harbor).
    pub preserve_dates: bool,
    /// Ages above this are redacted; ages at or below are left.
    pub age_cap: u32,
    pub replacement_strategy: ReplacementStrategy,
    pub scope: Scope,
    pub emit_receipt: bool,
    pub hmac_key: Option<String>,
    /// Byte count of overlap carried between chunks in the streaming adapter.
    pub streaming_buffer: usize,
    pub max_document_bytes: usize,
    pub max_spans_per_doc: usize,
    /// Soft deadline in milliseconds; `None` means no deadline.
    pub deadline_ms: Option<u64>,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::hipaa_strict()
    }
}

impl Policy {
    /// `HIPAA_STRICT`: every filter enabled, conservative thresholds,
    /// no date truncation.
    pub fn hipaa_strict() -> Self {
        Policy {
            profile: Profile::HipaaStrict,
            enabled_filters: None,
            sensitivity_threshold: BTreeMap::new(),
            default_threshold: 0.5,
            preserve_dates: false,
            age_cap: crate::config::DEFAULT_AGE_CAP,
            replacement_strategy: ReplacementStrategy::CategoryToken,
            scope: Scope::PerDocument,
            emit_receipt: false,
            hmac_key: None,
            streaming_buffer: 256,
            max_document_bytes: crate::config::DEFAULT_MAX_DOCUMENT_BYTES,
            max_spans_per_doc: crate::config::DEFAULT_MAX_SPANS_PER_DOC,
            deadline_ms: None,
        }
    }

    /// `HIPAA_LIMITED_DATASET`: dates truncated to year, ages kept below cap.
    pub fn hipaa_limited_dataset() -> Self {
        Policy {
            profile: Profile::HipaaLimitedDataset,
            preserve_dates: true,
            ..Policy::hipaa_strict()
        }
    }

    /// `DEVELOPMENT`: looser thresholds, receipts on by default for debugging.
    pub fn development() -> Self {
        Policy {
            profile: Profile::Development,
            default_threshold: 0.3,
            emit_receipt: true,
            ..Policy::hipaa_strict()
        }
    }

    /// Whether `filter_type` is enabled under this policy.
    pub fn is_enabled(&self, filter_type: FilterType) -> bool {
        match &self.enabled_filters {
            None => true,
            Some(set) => set.contains(&filter_type),
        }
    }

    /// Minimum confidence a span of `filter_type` must meet to survive.
    pub fn threshold_for(&self, filter_type: FilterType) -> f32 {
        self.sensitivity_threshold
            .get(&filter_type)
            .copied()
            .unwrap_or(self.default_threshold)
    }

    /// Validate structural invariants not already enforced by the type
    /// system (thresholds in range). Called before every `redact` call.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(PolicyError::InvalidField {
                field: "default_threshold".to_string(),
                reason: "must be in [0,1]".to_string(),
            });
        }
        for (filter_type, threshold) in &self.sensitivity_threshold {
            if !(0.0..=1.0).contains(threshold) {
                return Err(PolicyError::ThresholdOutOfRange(*filter_type));
            }
        }
        if self.max_document_bytes == 0 {
            return Err(PolicyError::InvalidField {
                field: "max_document_bytes".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Parse from the canonical wire format (spec §6.2): strict JSON,
    /// unknown fields rejected.
    pub fn from_json(s: &str) -> Result<Self, PolicyError> {
        let policy: Policy =
            serde_json::from_str(s).map_err(|e| PolicyError::Malformed(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Canonical serialisation (sorted keys at every nesting depth, no
    /// whitespace, UTF-8 NFC) whose SHA-256 is the `policyFingerprint` in
    /// the trust bundle (spec §4.6). `serde_json` emits struct fields in
    /// declaration order, not sorted order, so this round-trips through
    /// `serde_json::Value` and re-sorts every object's keys
    /// ([`crate::canonical::to_canonical_json`]) to get the canonical form
    /// spec §6.2 actually requires; inputs are expected to already be
    /// NFC-normalised text.
    pub fn canonical_json(&self) -> String {
        crate::canonical::to_canonical_json(self).expect("Policy always serialises")
    }

    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_hipaa_strict() {
        let p = Policy::default();
        assert_eq!(p.profile, Profile::HipaaStrict);
        assert!(!p.preserve_dates);
    }

    #[test]
    fn limited_dataset_preserves_year() {
        let p = Policy::hipaa_limited_dataset();
        assert!(p.preserve_dates);
    }

    #[test]
    fn is_enabled_defaults_to_all() {
        let p = Policy::hipaa_strict();
        assert!(p.is_enabled(FilterType::Ssn));
        assert!(p.is_enabled(FilterType::Hospital));
    }

    #[test]
    fn is_enabled_respects_explicit_set() {
        let mut p = Policy::hipaa_strict();
        let mut set = HashSet::new();
        set.insert(FilterType::Ssn);
        p.enabled_filters = Some(set);
        assert!(p.is_enabled(FilterType::Ssn));
        assert!(!p.is_enabled(FilterType::Name));
    }

    #[test]
    fn threshold_for_falls_back_to_default() {
        let p = Policy::hipaa_strict();
        assert_eq!(p.threshold_for(FilterType::Ssn), p.default_threshold);
    }

    #[test]
    fn threshold_for_uses_override() {
        let mut p = Policy::hipaa_strict();
        p.sensitivity_threshold.insert(FilterType::Name, 0.9);
        assert_eq!(p.threshold_for(FilterType::Name), 0.9);
        assert_eq!(p.threshold_for(FilterType::Ssn), p.default_threshold);
    }

    #[test]
    fn validate_rejects_out_of_range_default_threshold() {
        let mut p = Policy::hipaa_strict();
        p.default_threshold = 1.5;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_category_threshold() {
        let mut p = Policy::hipaa_strict();
        p.sensitivity_threshold.insert(FilterType::Name, -0.1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn from_json_round_trips() {
        let p = Policy::hipaa_strict();
        let json = p.canonical_json();
        let parsed = Policy::from_json(&json).unwrap();
        assert_eq!(parsed.profile, p.profile);
        assert_eq!(parsed.default_threshold, p.default_threshold);
    }

    #[test]
    fn from_json_rejects_unknown_field() {
        let json = r#"{"profile":"HipaaStrict","bogus_field":1}"#;
        let err = Policy::from_json(json);
        assert!(err.is_err());
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let p = Policy::hipaa_strict();
        assert_eq!(p.fingerprint(), p.fingerprint());
    }

    #[test]
    fn fingerprint_differs_on_change() {
        let p1 = Policy::hipaa_strict();
        let mut p2 = Policy::hipaa_strict();
        p2.default_threshold = 0.9;
        assert_ne!(p1.fingerprint(), p2.fingerprint());
    }
}
