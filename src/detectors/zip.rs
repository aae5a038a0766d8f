//! ZIP detector (spec §3.1 extension): US ZIP and ZIP+4, at priority 400.
//! Per HIPAA Safe Harbor, the first three digits may be retained when the
//! resulting region has a population over 20,000; that policy-driven
//! decision belongs to the replacement stage (C6), not detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "zip_detector";

static ZIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    ZIP_PATTERN
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["Address"]) || zip_like_context(text, m.start()))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Zip, 0.75, SOURCE))
        .collect()
}

/// A five-digit run right after "ZIP"/"zip code" reads as a ZIP even absent
/// a formal field label.
fn zip_like_context(text: &str, start: usize) -> bool {
    let before = &text[..start];
    let lower = before.to_lowercase();
    lower.trim_end().ends_with("zip") || lower.trim_end().ends_with("zip code") || lower.trim_end().ends_with("zip:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FieldLabel;
    use crate::policy::Policy;

    #[test]
    fn detects_plain_zip_after_keyword() {
        let spans = detect("ZIP 90210 on file", &RedactionContext::new(Policy::default()));
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn detects_zip_plus_four() {
        let spans = detect("ZIP: 90210-1234", &RedactionContext::new(Policy::default()));
        assert_eq!(spans[0].text, "90210-1234");
    }

    #[test]
    fn detects_zip_in_address_field() {
        let mut c = RedactionContext::new(Policy::default());
        c.field_map.push(FieldLabel {
            canonical: "Address".to_string(),
            label_start: 0,
            label_end: 8,
            value_start: 8,
            value_end: 40,
        });
        let spans = detect("Address: 100 Main St, 90210", &c);
        assert!(!spans.is_empty());
    }

    #[test]
    fn ignores_unrelated_five_digit_number() {
        let spans = detect("invoice total was 90210 dollars", &RedactionContext::new(Policy::default()));
        assert!(spans.is_empty());
    }
}
