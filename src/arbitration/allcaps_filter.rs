//! Arbitration stage 4 — all-caps structure filter (spec §4.4 stage 4).
//!
//! Sections in ALL-CAPS that are structural (e.g. "IMPRESSION", "FINDINGS")
//! are stripped of name-family detections that look like section headings;
//! PHI inside the section body is untouched by this stage.

use crate::context::RedactionContext;
use crate::span::Span;
use crate::vocabulary::is_section_header;

pub fn apply(spans: Vec<Span>, _ctx: &RedactionContext) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|s| {
            if !s.filter_type.is_name_family() {
                return true;
            }
            let looks_structural = s.text.chars().any(|c| c.is_alphabetic()) && s.text.chars().all(|c| !c.is_lowercase());
            !(looks_structural && is_section_header(&s.text))
        })
        .collect()
}
