//! URL detector (spec §4.1(a)): http(s) and bare-domain forms, at priority
//! 600.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "url_detector";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bhttps?://[^\s<>\x22]+|\bwww\.[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?:/[^\s<>\x22]*)?").unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| {
            let trimmed_end = m.as_str().trim_end_matches(|c: char| ".,;)".contains(c));
            let end = m.start() + trimmed_end.len();
            make_span(text, trimmed_end, m.start(), end, FilterType::Url, 0.93, SOURCE)
        })
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
    fn detects_https_url() {
        let spans = detect("portal at https://patient.clinic.example/login for access", &ctx());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn detects_bare_www_domain() {
        let spans = detect("see www.clinic-portal.example for details.", &ctx());
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].text.ends_with('.'));
    }

    #[test]
    fn strips_trailing_sentence_punctuation() {
        let spans = detect("visit https://clinic.example/portal.", &ctx());
        assert_eq!(spans[0].text, "https://clinic.example/portal");
    }
}
