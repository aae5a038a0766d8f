//! ADDRESS detector (spec §4.1(c)): a small structural automaton for
//! street-address lines (number, street name, suffix, optional unit), at
//! priority 400.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "address_detector";

const SUFFIXES: &[&str] = &[
    "street", "st", "avenue", "ave", "boulevard", "blvd", "road", "rd", "lane", "ln",
    "drive", "dr", "court", "ct", "place", "pl", "way", "terrace", "circle", "cir",
];

static STREET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = SUFFIXES.join("|");
    Regex::new(&format!(
        r"(?i)\b\d{{1,6}}\s+[A-Za-z0-9.'\s]{{1,40}}?\b(?:{suffixes})\b\.?(?:\s*,?\s*(?:Apt|Suite|Ste|Unit|#)\.?\s*[A-Za-z0-9-]+)?"
    ))
    .unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    STREET_LINE
        .find_iter(text)
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Address, 0.82, SOURCE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn detects_basic_street_address() {
        let spans = detect("residence at 742 Evergreen Terrace recorded", &ctx());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn detects_address_with_unit() {
        let spans = detect("mail to 100 Main St, Apt 4B for records", &ctx());
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text.contains("Apt"));
    }

    #[test]
    fn ignores_text_without_street_suffix() {
        let spans = detect("the 742 number came up twice in review", &ctx());
        assert!(spans.is_empty());
    }
}
