//! CREDIT_CARD detector (spec §4.1(a)): 13-19 digit sequences (with optional
//! separators) validated by Luhn checksum, at priority 1000.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{luhn_valid, make_span};

const SOURCE: &str = "credit_card_detector";

static CARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d[ -]?){12,18}\d\b").unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in CARD_PATTERN.find_iter(text) {
        let raw = m.as_str();
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if !(13..=19).contains(&digits.len()) {
            continue;
        }
        if !luhn_valid(&digits) {
            continue;
        }
        spans.push(make_span(text, raw, m.start(), m.end(), FilterType::CreditCard, 0.96, SOURCE));
    }
    spans
}
