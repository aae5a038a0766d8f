//! BANK_ACCOUNT detector (spec §4.1(a)): IBAN (structurally validated via
//! mod-97) plus field-context-gated domestic account numbers, at priority
//! 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const IBAN_SOURCE: &str = "iban_detector";
const DOMESTIC_SOURCE: &str = "bank_account_detector";

static IBAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b").unwrap());

static DOMESTIC_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{8,17}\b").unwrap());

/// ISO 13616 mod-97 check: move the first four characters to the end,
/// convert letters to numbers (A=10..Z=35), and verify the remainder is 1.
fn iban_checksum_valid(iban: &str) -> bool {
    if iban.len() < 15 {
        return false;
    }
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u64 = 0;
    for c in rearranged.chars() {
        let value = if c.is_ascii_digit() {
            c.to_digit(10).unwrap() as u64
        } else if c.is_ascii_uppercase() {
            (c as u64) - ('A' as u64) + 10
        } else {
            return false;
        };
        let digits = if value >= 10 { 2 } else { 1 };
        remainder = (remainder * 10u64.pow(digits) + value) % 97;
    }
    remainder == 1
}

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in IBAN_PATTERN.find_iter(text) {
        if iban_checksum_valid(m.as_str()) {
            spans.push(make_span(text, m.as_str(), m.start(), m.end(), FilterType::BankAccount, 0.95, IBAN_SOURCE));
        }
    }
    for m in DOMESTIC_CANDIDATE.find_iter(text) {
        if spans.iter().any(|s| s.char_start < m.end() && m.start() < s.char_end) {
            continue;
        }
        if near_field_label(ctx, m.start(), &["Account"]) {
            spans.push(make_span(text, m.as_str(), m.start(), m.end(), FilterType::BankAccount, 0.8, DOMESTIC_SOURCE));
        }
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
    fn detects_valid_iban() {
        // GB29 NWBK 6016 1331 9268 19 is the canonical IBAN test fixture.
        let spans = detect("Wire to GB29NWBK60161331926819 please", &ctx());
        assert!(spans.iter().any(|s| s.filter_type == FilterType::BankAccount));
    }

    #[test]
    fn rejects_invalid_iban_checksum() {
        let spans = detect("Wire to GB29NWBK60161331926810 please", &ctx());
        assert!(spans.is_empty());
    }

    #[test]
    fn domestic_account_requires_field_context() {
        let mut c = ctx();
        c.field_map.push(FieldLabel {
            canonical: "Account".to_string(),
            label_start: 0,
            label_end: 9,
            value_start: 9,
            value_end: 30,
        });
        let spans = detect("Account: 00219988776", &c);
        assert_eq!(spans.len(), 1);
    }
}
