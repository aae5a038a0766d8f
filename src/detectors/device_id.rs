//! DEVICE_ID detector (spec §3.1 extension): serial numbers of implanted or
//! bedside medical devices, recognised via a `Serial`/`Device`/`S/N` field
//! label plus a manufacturer mention nearby — narrow and policy-bound per
//! spec §3.2's tier-200 rationale, priority 200.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};
use crate::vocabulary::is_device_manufacturer;

use super::common::make_span;

const SOURCE: &str = "device_id_detector";

static SERIAL_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:s/?n|serial(?:\s+number)?|device\s+id)\s*[:#]?\s*([A-Z0-9][A-Z0-9-]{4,19})").unwrap()
});

const RADIUS: usize = 40;

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for caps in SERIAL_LABEL.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let id = caps.get(1).unwrap();
        let lo = whole.start().saturating_sub(RADIUS);
        let hi = (whole.end() + RADIUS).min(text.len());
        let window = &text[lo..hi];
        if !mentions_manufacturer(window) {
            continue;
        }
        spans.push(make_span(text, id.as_str(), id.start(), id.end(), FilterType::DeviceId, 0.8, SOURCE));
    }
    spans
}

fn mentions_manufacturer(window: &str) -> bool {
    window
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(is_device_manufacturer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn detects_serial_near_manufacturer_mention() {
        let spans = detect("Medtronic pacemaker, Serial Number: MN-882301", &ctx());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "MN-882301");
    }

    #[test]
    fn ignores_serial_without_manufacturer_context() {
        let spans = detect("Serial Number: MN-882301 recorded in chart", &ctx());
        assert!(spans.is_empty());
    }
}
