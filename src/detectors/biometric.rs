//! BIOMETRIC detector (spec §3.1 extension): identifiers attached to a named
//! biometric modality (fingerprint, retinal/iris scan, voiceprint) rather
//! than the raw biometric data itself — the core never sees pixels or audio
//! (spec §1 Non-goals; C10 handles image-derived biometrics). Priority 200.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "biometric_detector";

static BIOMETRIC_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fingerprint|retinal scan|iris scan|voiceprint)\s*(?:id|code|ref(?:erence)?)?\s*[:#]\s*([A-Z0-9-]{4,20})").unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    BIOMETRIC_ID
        .captures_iter(text)
        .map(|caps| caps.get(1).unwrap())
        .map(|id| make_span(text, id.as_str(), id.start(), id.end(), FilterType::Biometric, 0.8, SOURCE))
        .collect()
}
