//! ACCOUNT_NUMBER detector (spec §4.1(a)): billing/account identifiers,
//! field-context gated like MRN, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "account_detector";

static ACCOUNT_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z0-9]{6,16}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    ACCOUNT_CANDIDATE
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["Account"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::AccountNumber, 0.85, SOURCE))
        .collect()
}
