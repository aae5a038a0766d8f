//! Arbitration stage 6 — confidence modifier (spec §4.4 stage 6).
//!
//! Applies per-category thresholds from the policy; spans below threshold
//! are dropped.

use crate::context::RedactionContext;
use crate::span::Span;

pub fn apply(spans: Vec<Span>, ctx: &RedactionContext) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|s| s.confidence >= ctx.policy.threshold_for(s.filter_type))
        .collect()
}
