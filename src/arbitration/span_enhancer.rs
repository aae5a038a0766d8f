//! Arbitration stage 7 — span enhancer (spec §4.4 stage 7).
//!
//! Extends a span leftward/rightward to absorb directly adjacent tokens
//! that belong to the same entity: a trailing credential after a name
//! ("Dr. Wilson" + ", MD"), or a trailing apartment/unit number after a
//! street address that the detector's own regex didn't already capture.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};
use crate::vocabulary::is_credential;

static TRAILING_CREDENTIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^,?\s*([A-Za-z]{2,6})\.?\b").unwrap());

static TRAILING_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^,?\s*(?:apt|suite|ste|unit|#)\.?\s*[A-Za-z0-9-]+\b").unwrap());

pub fn apply(mut spans: Vec<Span>, source: &str) -> Vec<Span> {
    for span in &mut spans {
        match span.filter_type {
            FilterType::Name | FilterType::FirstName | FilterType::LastName => {
                extend_with_credential(span, source);
            }
            FilterType::Address => {
                extend_with_unit(span, source);
            }
            _ => {}
        }
    }
    spans
}

fn extend_with_credential(span: &mut Span, source: &str) {
    let Some(tail) = source.get(span.char_end..) else { return };
    let Some(caps) = TRAILING_CREDENTIAL.captures(tail) else { return };
    let whole = caps.get(0).unwrap();
    let word = caps.get(1).unwrap().as_str();
    if is_credential(word) {
        span.char_end += whole.end();
        span.text = source[span.char_start..span.char_end].to_string();
        span.original_value = span.text.clone();
        span.touched_by("span_enhancer");
    }
}

fn extend_with_unit(span: &mut Span, source: &str) {
    let Some(tail) = source.get(span.char_end..) else { return };
    if tail.to_ascii_lowercase().starts_with(" apt")
        || tail.to_ascii_lowercase().starts_with(", apt")
        || TRAILING_UNIT.is_match(tail)
    {
        if let Some(m) = TRAILING_UNIT.find(tail) {
            span.char_end += m.end();
            span.text = source[span.char_start..span.char_end].to_string();
            span.original_value = span.text.clone();
            span.touched_by("span_enhancer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    #[allow(dead_code)]
    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn extends_name_span_to_absorb_trailing_credential() {
        let source = "Seen by Dr. Wilson, MD today";
        let start = source.find("Wilson").unwrap();
        let span = Span::new("Wilson", "Wilson", start, start + 6, FilterType::Name, 0.8, "name_detector");
        let result = apply(vec![span], source);
        assert_eq!(result[0].text, "Wilson, MD");
    }

    #[test]
    fn extends_address_span_to_absorb_trailing_unit() {
        let source = "mail to 100 Main St, Apt 4B please";
        let start = source.find("100 Main St").unwrap();
        let end = start + "100 Main St".len();
        let span = Span::new("100 Main St", "100 Main St", start, end, FilterType::Address, 0.8, "address_detector");
        let result = apply(vec![span], source);
        assert!(result[0].text.contains("Apt 4B"));
    }

    #[test]
    fn leaves_span_unchanged_without_adjacent_entity_token() {
        let source = "Seen by Dr. Wilson today";
        let start = source.find("Wilson").unwrap();
        let span = Span::new("Wilson", "Wilson", start, start + 6, FilterType::Name, 0.8, "name_detector");
        let result = apply(vec![span], source);
        assert_eq!(result[0].text, "Wilson");
    }
}
