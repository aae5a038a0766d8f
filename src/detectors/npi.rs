//! NPI detector (spec §4.1(a)): 10-digit National Provider Identifier,
//! checksum-validated, at priority 1000.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label, npi_checksum_valid};

const SOURCE: &str = "npi_detector";

static NPI_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{10}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in NPI_PATTERN.find_iter(text) {
        let raw = m.as_str();
        let near = near_field_label(ctx, m.start(), &["Provider"]);
        let checksum_ok = npi_checksum_valid(raw);
        if !checksum_ok && !near {
            continue;
        }
        let confidence = if checksum_ok { 0.95 } else { 0.55 };
        spans.push(make_span(text, raw, m.start(), m.end(), FilterType::Npi, confidence, SOURCE));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FieldLabel;
    use crate::policy::Policy;

    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn detects_checksum_valid_npi() {
        let spans = detect("Provider NPI 1234567893 on file", &ctx());
        assert_eq!(spans.len(), 1);
        assert!(spans[0].confidence > 0.9);
    }

    #[test]
    fn ignores_random_10_digit_number_without_context() {
        let spans = detect("order quantity 1234567890 units", &ctx());
        assert!(spans.is_empty());
    }

    #[test]
    fn field_label_rescues_unvalidated_digits() {
        let mut c = ctx();
        c.field_map.push(FieldLabel {
            canonical: "Provider".to_string(),
            label_start: 0,
            label_end: 8,
            value_start: 8,
            value_end: 30,
        });
        let spans = detect("Provider: 1234567890", &c);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].confidence < 0.9);
    }
}
