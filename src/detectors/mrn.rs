//! MRN detector (spec §4.1(a)): medical record numbers are facility-specific
//! free-form alphanumeric strings, so this detector leans entirely on field
//! context rather than a universal format, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "mrn_detector";

static MRN_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{0,3}\d{5,10}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    MRN_CANDIDATE
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["MRN"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Mrn, 0.88, SOURCE))
        .collect()
}
