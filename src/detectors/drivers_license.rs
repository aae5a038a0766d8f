//! DRIVERS_LICENSE detector (spec §4.1(a)): state license numbers have no
//! universal format, so detection is field-context gated, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "drivers_license_detector";

static LICENSE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{0,2}\d{5,9}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    LICENSE_CANDIDATE
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["License"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::DriversLicense, 0.82, SOURCE))
        .collect()
}
