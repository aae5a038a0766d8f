//! Arbitration stage 3 — document vocabulary filter (spec §4.4 stage 3,
//! scenario E2: "Wilson's disease" vs "Dr. Wilson").
//!
//! For each name-family span whose normalised form (or whose range,
//! widened to the containing word run) appears in the medical-term
//! allow-list, drop the span. Asymmetry: medical terms never outrank
//! numeric-format PHI (those categories are never name-family, so this
//! stage never touches them).

use crate::context::RedactionContext;
use crate::span::Span;
use crate::vocabulary::is_medical_term;

/// Widen `[start, end)` to the full word/punctuated-phrase it sits inside,
/// so "Wilson" inside "Wilson's disease" is checked against the whole
/// phrase rather than just the bare surname.
fn containing_phrase(source: &str, start: usize, end: usize) -> &str {
    let lo = source[..start]
        .rfind(|c: char| c == '\n' || (c.is_ascii_punctuation() && c != '\'' && c != '-'))
        .map(|i| i + 1)
        .unwrap_or(0);
    let hi = source[end..]
        .find(|c: char| c == '\n' || (c.is_ascii_punctuation() && c != '\'' && c != '-'))
        .map(|i| end + i)
        .unwrap_or(source.len());
    source[lo..hi].trim()
}

pub fn apply(spans: Vec<Span>, ctx: &RedactionContext, source: &str) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|s| {
            if !s.filter_type.is_name_family() {
                return true;
            }
            let phrase = containing_phrase(source, s.char_start, s.char_end);
            let on_allow_list =
                is_medical_term(&s.text) || is_medical_term(phrase) || ctx.document_vocabulary.contains(&s.text.to_lowercase());
            !on_allow_list
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;
    use crate::span::FilterType;

    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn drops_name_family_span_covered_by_medical_term() {
        let text = "Patient has Wilson's disease; provider Dr. Wilson.";
        let wilson_start = text.find("Wilson's").unwrap();
        let spans = vec![Span::new(
            "Wilson's",
            "Wilson's",
            wilson_start,
            wilson_start + 8,
            FilterType::LastName,
            0.6,
            "name_detector",
        )];
        assert!(apply(spans, &ctx(), text).is_empty());
    }

    #[test]
    fn keeps_unrelated_name_span() {
        let text = "Patient has Wilson's disease; provider Dr. Wilson.";
        let dr_wilson_start = text.rfind("Wilson").unwrap();
        let spans = vec![Span::new(
            "Dr. Wilson",
            "Dr. Wilson",
            dr_wilson_start - 4,
            dr_wilson_start + 6,
            FilterType::Name,
            0.9,
            "name_detector",
        )];
        assert_eq!(apply(spans, &ctx(), text).len(), 1);
    }

    #[test]
    fn never_filters_non_name_family_spans() {
        let text = "SSN: 456-78-9012";
        let spans = vec![Span::new("456-78-9012", "456-78-9012", 5, 16, FilterType::Ssn, 0.97, "ssn_detector")];
        assert_eq!(apply(spans, &ctx(), text).len(), 1);
    }
}
