//! DATE detector (spec §4.1(c)): US, ISO, European, "Mar 15 2024", and
//! abbreviated forms. Assigns a `DateKind` sub-tag when a preceding field
//! label is present, at priority 500.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{DateKind, FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "date_detector";

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    // MM/DD/YYYY, MM-DD-YYYY, YYYY-MM-DD, with 2- or 4-digit year.
    Regex::new(
        r"\b(?:(?:0?[1-9]|1[0-2])[/-](?:0?[1-9]|[12]\d|3[01])[/-](?:\d{4}|\d{2})|(?:\d{4})-(?:0?[1-9]|1[0-2])-(?:0?[1-9]|[12]\d|3[01]))\b",
    )
    .unwrap()
});

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

static MONTH_NAME_DATE: LazyLock<Regex> = LazyLock::new(|| {
    let months = MONTHS.join("|");
    Regex::new(&format!(
        r"(?i)\b(?:(?:{months})\.?\s+\d{{1,2}},?\s+\d{{4}}|\d{{1,2}}\s+(?:{months})\.?\s+\d{{4}})\b"
    ))
    .unwrap()
});

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in NUMERIC_DATE.find_iter(text) {
        spans.push(build_span(text, m.start(), m.end(), ctx));
    }
    for m in MONTH_NAME_DATE.find_iter(text) {
        // Avoid double-emitting a region already caught by the numeric regex.
        if spans.iter().any(|s| byte_range_overlaps(s, m.start(), m.end())) {
            continue;
        }
        spans.push(build_span(text, m.start(), m.end(), ctx));
    }
    spans
}

fn byte_range_overlaps(span: &Span, start: usize, end: usize) -> bool {
    span.char_start < end && start < span.char_end
}

fn build_span(text: &str, start: usize, end: usize, ctx: &RedactionContext) -> Span {
    let mut span = make_span(text, &text[start..end], start, end, FilterType::Date, 0.85, SOURCE);
    span.date_kind = Some(classify_kind(ctx, start));
    span
}

fn classify_kind(ctx: &RedactionContext, start: usize) -> DateKind {
    match ctx.field_at(start).map(|f| f.canonical.as_str()) {
        Some("DOB") => DateKind::Dob,
        Some("AdmitDate") | Some("VisitDate") => DateKind::Visit,
        Some("DischargeDate") => DateKind::Discharge,
        _ => DateKind::Unspecified,
    }
}
