//! Arbitration stage 1 — field-context detector (spec §4.4 stage 1).
//!
//! Scans the original text for `<LABEL>:` patterns anchored at line starts
//! and populates `ctx.field_map`. Unlike the other ten stages, this one runs
//! *before* the parallel detector runner (C4): several C3 detectors
//! (MRN, account, passport, drivers-license, health-plan...) are themselves
//! field-context-gated and need `ctx.field_map` populated to produce any
//! spans at all. The orchestrator (C8) calls [`scan`] once, then runs C4,
//! then the remaining ten stages in this module in order.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{FieldLabel, RedactionContext};
use crate::vocabulary::canonical_field_label;

/// `<label text>:` anchored at the start of a line (allowing leading
/// whitespace), capturing the label text and the position just after the
/// colon.
static LABEL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*([A-Za-z][A-Za-z '/.-]{1,30}?)\s*:[ \t]*").unwrap());

/// Populate `ctx.field_map` with every recognised label on its own line.
/// A label's value region runs from just after the colon to the end of its
/// line (line breaks end a field's value; multiple labels never share a
/// line in this scanner's grammar, matching the seed corpus's one-label-
/// per-line convention).
pub fn scan(text: &str, ctx: &mut RedactionContext) {
    ctx.field_map.clear();
    for caps in LABEL_LINE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let label = caps.get(1).unwrap();
        let Some(canonical) = canonical_field_label(label.as_str()) else {
            continue;
        };
        let value_start = whole.end();
        let value_end = text[value_start..]
            .find('\n')
            .map(|rel| value_start + rel)
            .unwrap_or(text.len());
        ctx.field_map.push(FieldLabel {
            canonical: canonical.to_string(),
            label_start: label.start(),
            label_end: label.end(),
            value_start,
            value_end,
        });
    }
}
