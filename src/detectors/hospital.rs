//! HOSPITAL detector (spec §3.1 extension): named healthcare facilities,
//! via the curated dictionary, at priority 400.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};
use crate::vocabulary::is_hospital_name;

use super::common::make_span;

const SOURCE: &str = "hospital_detector";

/// A capitalised run of 2-5 words, candidate-scanned against the hospital
/// dictionary rather than matched by a naming-convention regex (facility
/// names have no consistent grammatical shape).
static CAPITALIZED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z][a-zA-Z'.-]*\s+){1,4}[A-Z][a-zA-Z'.-]*\b").unwrap());

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    CAPITALIZED_RUN
        .find_iter(text)
        .filter(|m| is_hospital_name(m.as_str()))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Hospital, 0.9, SOURCE))
        .collect()
}
