//! AGE_OVER_89 detector (spec §4.1(c), scenario E5): ages above
//! `policy.age_cap` are flagged; ages at or below it are left alone. The
//! cap check happens here rather than in a later stage because the
//! detector already has the parsed integer in hand — post-filter (stage 10)
//! re-confirms the cap from policy in case it changed between detection and
//! arbitration (it never does within one call, but keeps the invariant
//! local to one place per spec §4.4 stage 10).

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "age_detector";

static AGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})[- ]year[- ]old\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let cap = ctx.policy.age_cap;
    let mut spans = Vec::new();
    for caps in AGE_PATTERN.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let digits = caps.get(1).unwrap();
        let age: u32 = match digits.as_str().parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if age <= cap {
            continue;
        }
        spans.push(make_span(
            text,
            digits.as_str(),
            digits.start(),
            digits.end(),
            FilterType::AgeOver89,
            0.92,
            SOURCE,
        ));
        let _ = whole;
    }
    spans
}
