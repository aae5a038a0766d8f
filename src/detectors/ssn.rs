//! SSN detector (spec §4.1(a)): `XXX-XX-XXXX` format with area/group/serial
//! range validation, at priority 1000.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};
use crate::vocabulary::ocr_fold_digits;

use super::common::{make_span, near_field_label};

const SOURCE: &str = "ssn_detector";

static SSN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-\s]\d{2}[-\s]\d{4}\b").unwrap());

/// Known-invalid SSN values per SSA rules: area `000`, `666`, or `900-999`;
/// group `00`; serial `0000`.
fn is_valid_ssn_shape(area: &str, group: &str, serial: &str) -> bool {
    let area_n: u32 = area.parse().unwrap_or(0);
    let group_n: u32 = group.parse().unwrap_or(0);
    let serial_n: u32 = serial.parse().unwrap_or(0);
    area_n != 0 && area_n != 666 && area_n < 900 && group_n != 0 && serial_n != 0
}

/// Matches against an OCR-confusion-folded view of `text` (spec §4.1 "OCR
/// tolerance": `0/O`, `1/l/I`, `5/S`, `8/B` collapsed before lookup) so a
/// scanned/recognised SSN like `4S6-7B-9O12` still matches `456-78-9012`.
/// [`ocr_fold_digits`] is one ASCII byte for one ASCII byte, so match
/// offsets from the folded view apply unchanged to the original `text`
/// (spec §4.1: "Offsets returned are always in the original text").
pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let folded = ocr_fold_digits(text);
    let mut spans = Vec::new();
    for m in SSN_PATTERN.find_iter(&folded) {
        let raw = m.as_str();
        let digits: Vec<&str> = raw.split(|c: char| c == '-' || c.is_whitespace()).collect();
        let [area, group, serial] = [digits[0], digits[1], digits[2]];
        let valid_shape = is_valid_ssn_shape(area, group, serial);
        let near_label = near_field_label(ctx, m.start(), &["SSN"]);
        // A structurally invalid shape still gets flagged, but at reduced
        // confidence unless a field label confirms intent (spec §4.1(a)).
        let confidence = match (valid_shape, near_label) {
            (true, _) => 0.97,
            (false, true) => 0.7,
            (false, false) => 0.45,
        };
        spans.push(make_span(text, &text[m.start()..m.end()], m.start(), m.end(), FilterType::Ssn, confidence, SOURCE));
    }
    spans
}
