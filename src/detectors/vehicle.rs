//! VEHICLE detector (spec §3.1 extension): license plates and VINs, field-
//! context gated like MRN/account — no universal plate format exists across
//! jurisdictions, priority 200.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const VIN_SOURCE: &str = "vin_detector";
const PLATE_SOURCE: &str = "license_plate_detector";

/// 17-character VIN: letters and digits excluding I, O, Q (easily confused
/// with 1/0).
static VIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-HJ-NPR-Z0-9]{17}\b").unwrap());

static PLATE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z0-9]{5,8}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    let mut spans: Vec<Span> = VIN_PATTERN
        .find_iter(text)
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::Vehicle, 0.85, VIN_SOURCE))
        .collect();

    for m in PLATE_CANDIDATE.find_iter(text) {
        if spans.iter().any(|s| s.char_start < m.end() && m.start() < s.char_end) {
            continue;
        }
        if near_field_label(ctx, m.start(), &["LicensePlate", "Vehicle"]) {
            spans.push(make_span(text, m.as_str(), m.start(), m.end(), FilterType::Vehicle, 0.75, PLATE_SOURCE));
        }
    }
    spans
}
