//! MEDICARE and MEDICAID detectors (spec §4.1(a)): Medicare Beneficiary
//! Identifier (MBI, 11-character alphanumeric) and Medicaid ID (state-issued,
//! recognised via field label), both at priority 1000.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const MBI_SOURCE: &str = "medicare_detector";
const MEDICAID_SOURCE: &str = "medicaid_detector";

// MBI format (CMS, 2018 onward): C-A-N-N-A-A-N-N-A-A-N where C = {1-9},
// A = {A-Z excluding S,L,O,I,B,Z}, N = {0-9}.
static MBI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[1-9][A-Z0-9][0-9][A-Z\-][A-Z0-9][0-9][A-Z\-][A-Z0-9][0-9][A-Z\-][0-9]{2}\b")
        .unwrap()
});

static MEDICAID_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z0-9]{8,12}\b").unwrap());

pub fn detect_medicare(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    MBI_PATTERN
        .find_iter(text)
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Medicare, 0.9, MBI_SOURCE))
        .collect()
}

pub fn detect_medicaid(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    MEDICAID_PATTERN
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["Insurance", "HealthPlan"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Medicaid, 0.75, MEDICAID_SOURCE))
        .collect()
}
