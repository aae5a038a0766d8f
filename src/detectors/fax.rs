//! FAX detector (spec §4.1(a)): same numbering-plan shape as PHONE, but only
//! tagged FAX when a `Fax:` field label precedes it; otherwise the shared
//! shape is left to the phone detector. Priority 500.

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};
use super::phone::phone_pattern;

const SOURCE: &str = "fax_detector";

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    phone_pattern()
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["Fax"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Fax, 0.9, SOURCE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FieldLabel;
    use crate::policy::Policy;

    #[test]
    fn detects_number_after_fax_label() {
        let mut c = RedactionContext::new(Policy::default());
        c.field_map.push(FieldLabel {
            canonical: "Fax".to_string(),
            label_start: 0,
            label_end: 4,
            value_start: 4,
            value_end: 20,
        });
        let spans = detect("Fax: 555-123-4567", &c);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].filter_type, FilterType::Fax);
    }

    #[test]
    fn ignores_number_without_fax_label() {
        let spans = detect("call 555-123-4567 instead", &RedactionContext::new(Policy::default()));
        assert!(spans.is_empty());
    }
}
