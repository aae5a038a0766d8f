//! UNIQUE_ID detector (spec §3.2): the last-resort fallback for alphanumeric
//! identifiers introduced by a generic `ID:`/`Identifier:`/`Ref:` label that
//! none of the more specific field-context labels claim. Priority 100 — it
//! never outranks a specific-category detector on the same range (spec §4.4
//! stage 9's priority-first tie-break handles that automatically).

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "unique_id_detector";

static GENERIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:id|identifier|ref(?:erence)?)\s*[:#]\s*([A-Za-z0-9-]{4,24})").unwrap());

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    GENERIC_ID
        .captures_iter(text)
        .map(|caps| caps.get(1).unwrap())
        .map(|id| make_span(text, id.as_str(), id.start(), id.end(), FilterType::UniqueId, 0.55, SOURCE))
        .collect()
}
