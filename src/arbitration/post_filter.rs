//! Arbitration stage 10 — post-filter (spec §4.4 stage 10).
//!
//! Applies policy-level suppression: under `preserve_dates` (Limited
//! Dataset Safe Harbor), DATE spans are narrowed to redact only the
//! month/day portion and leave the year in the clear. Ages at or below
//! `policy.age_cap` are dropped defensively even though the age detector
//! already enforces the cap, since a caller may have constructed spans for
//! this stage directly (tests, alternate detector sources).

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").unwrap());

pub fn apply(spans: Vec<Span>, ctx: &RedactionContext, source: &str) -> Vec<Span> {
    spans
        .into_iter()
        .filter_map(|s| filter_span(s, ctx, source))
        .collect()
}

fn filter_span(mut span: Span, ctx: &RedactionContext, source: &str) -> Option<Span> {
    if span.filter_type == FilterType::AgeOver89 {
        if let Ok(age) = span.text.parse::<u32>() {
            if age <= ctx.policy.age_cap {
                return None;
            }
        }
    }

    if ctx.policy.preserve_dates && span.filter_type == FilterType::Date {
        span = narrow_to_exclude_year(span, source);
    }

    Some(span)
}

/// Narrow a DATE span to exclude a 4-digit year at either end, preserving
/// it in the output. If the year sits in the interior of the text (not
/// produced by any current detector format, but defensively handled), the
/// span is left untouched rather than narrowed incorrectly.
fn narrow_to_exclude_year(mut span: Span, source: &str) -> Span {
    let Some(m) = YEAR.find(&span.text) else { return span };

    if m.start() == 0 {
        // Year leads ("2024-03-15"): skip the year and the following separator.
        let mut new_start = span.char_start + m.end();
        let rest = &source[new_start..span.char_end];
        if rest.starts_with('-') || rest.starts_with('/') {
            new_start += 1;
        }
        if new_start < span.char_end {
            span.char_start = new_start;
            span.text = source[span.char_start..span.char_end].to_string();
            span.original_value = span.text.clone();
            span.touched_by("post_filter");
        }
    } else if m.end() == span.text.len() {
        // Year trails ("03/15/2024", "Mar 15, 2024"): drop the year and the
        // preceding separator/whitespace.
        let mut new_end = span.char_start + m.start();
        let prefix = &source[span.char_start..new_end];
        let trimmed = prefix.trim_end_matches(|c: char| c == '/' || c == '-' || c == ',' || c.is_whitespace());
        new_end = span.char_start + trimmed.len();
        if new_end > span.char_start {
            span.char_end = new_end;
            span.text = source[span.char_start..span.char_end].to_string();
            span.original_value = span.text.clone();
            span.touched_by("post_filter");
        }
    }
    span
}
