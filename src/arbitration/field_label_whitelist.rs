//! Arbitration stage 2 — field-label whitelist (spec §4.4 stage 2).
//!
//! Removes any span whose range *exactly* covers a field label itself
//! (e.g. the word "Patient" in "Patient:" is not a name).

use crate::context::RedactionContext;
use crate::span::Span;

pub fn apply(spans: Vec<Span>, ctx: &RedactionContext) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|s| {
            !ctx.field_map
                .iter()
                .any(|f| f.label_start == s.char_start && f.label_end == s.char_end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FieldLabel;
    use crate::policy::Policy;
    use crate::span::FilterType;

    #[test]
    fn drops_span_exactly_covering_a_label() {
        let mut ctx = RedactionContext::new(Policy::default());
        ctx.field_map.push(FieldLabel {
            canonical: "Patient".to_string(),
            label_start: 0,
            label_end: 7,
            value_start: 9,
            value_end: 20,
        });
        let spans = vec![Span::new("Patient", "Patient", 0, 7, FilterType::Name, 0.6, "name_detector")];
        assert!(apply(spans, &ctx).is_empty());
    }

    #[test]
    fn keeps_span_inside_the_value_region() {
        let mut ctx = RedactionContext::new(Policy::default());
        ctx.field_map.push(FieldLabel {
            canonical: "Patient".to_string(),
            label_start: 0,
            label_end: 7,
            value_start: 9,
            value_end: 20,
        });
        let spans = vec![Span::new("Smith", "Smith", 9, 14, FilterType::Name, 0.9, "name_detector")];
        assert_eq!(apply(spans, &ctx).len(), 1);
    }
}
