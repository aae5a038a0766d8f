//! EMAIL detector (spec §4.1(a)): standard address shape, at priority 600.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "email_detector";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Email, 0.97, SOURCE))
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
    fn detects_basic_address() {
        let spans = detect("contact patient at jane.doe@example.com today", &ctx());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "jane.doe@example.com");
    }

    #[test]
    fn detects_plus_addressing() {
        let spans = detect("reply to j.doe+billing@sub.clinic.org", &ctx());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_bare_at_symbol() {
        let spans = detect("meet @ 3pm in the lobby", &ctx());
        assert!(spans.is_empty());
    }
}
