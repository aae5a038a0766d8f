//! DEA registration number detector (spec §4.1(a)): 2 letters + 7 digits,
//! with the DEA's own checksum digit, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "dea_detector";

static DEA_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2}\d{7}\b").unwrap());

/// DEA check digit: sum digits 1,3,5 and digits 2,4,6 (doubled), add, the
/// last digit of the total must equal the 7th digit.
fn dea_checksum_valid(digits: &str) -> bool {
    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.len() != 7 {
        return false;
    }
    let odd_sum = d[0] + d[2] + d[4];
    let even_sum = (d[1] + d[3] + d[5]) * 2;
    let total = odd_sum + even_sum;
    total % 10 == d[6]
}

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in DEA_PATTERN.find_iter(text) {
        let raw = m.as_str();
        let digits = &raw[2..];
        let confidence = if dea_checksum_valid(digits) { 0.93 } else { 0.5 };
        spans.push(make_span(text, raw, m.start(), m.end(), FilterType::Dea, confidence, SOURCE));
    }
    spans
}
