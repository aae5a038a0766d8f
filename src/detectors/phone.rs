//! PHONE detector (spec §4.1(a)): North American Numbering Plan formats
//! with optional extension, at priority 500.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "phone_detector";

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}(?:\s*(?:x|ext\.?)\s*\d{1,6})?",
    )
    .unwrap()
});

/// Shared with [`super::fax`], which tags the same numbering-plan shape
/// differently depending on field context.
pub(super) fn phone_pattern() -> &'static Regex {
    &PHONE_PATTERN
}

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    PHONE_PATTERN
        .find_iter(text)
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Phone, 0.9, SOURCE))
        .collect()
}
