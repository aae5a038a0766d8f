//! PASSPORT detector (spec §4.1(a)): US passport numbers are 9 digits (older
//! books) or a letter followed by 8 digits (post-2021 books), field-context
//! gated, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "passport_detector";

static PASSPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z]\d{8}|\d{9})\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    PASSPORT_PATTERN
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["Passport"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Passport, 0.86, SOURCE))
        .collect()
}
