//! OCR/image collaborator interface (C10, spec §6.5).
//!
//! A host that has already OCR'd an image page (or a DICOM frame) hands
//! this module the recognised text plus per-token and per-face bounding
//! boxes; it runs the same text pipeline over `recognised_text` and maps
//! the resulting spans back onto pixel regions via `token_boxes`, unioned
//! with `face_boxes`. This crate never touches pixels itself — "pixel
//! editing is performed by the collaborator" (spec §6.5) — it only decides
//! *which* boxes need masking.

use crate::context::RedactionContext;
use crate::error::RedactError;
use crate::policy::Policy;
use crate::replacement::{self, ReplacementRegistry};
use crate::span::Span;
use crate::{arbitration, runner};

/// One recognised token's bounding box on the source image, aligned to a
/// `[char_start, char_end)` range in `recognised_text` (spec §6.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenBox {
    pub char_start: usize,
    pub char_end: usize,
    pub bbox: [f32; 4],
    pub confidence: f32,
}

/// A detected face region, independent of any text span (spec §6.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub bbox: [f32; 4],
    pub confidence: f32,
}

/// One page's OCR output, as handed in by the collaborator.
#[derive(Debug, Clone)]
pub struct OcrPage {
    pub recognised_text: String,
    pub token_boxes: Vec<TokenBox>,
    pub face_boxes: Vec<FaceBox>,
}

/// Result of redacting one [`OcrPage`]: the text spans found, and the
/// bounding boxes the collaborator should mask (every `token_boxes` entry
/// overlapping a redacted span, unioned with every `face_boxes` entry).
#[derive(Debug, Clone)]
pub struct OcrRedactResult {
    pub spans: Vec<Span>,
    pub redacted_text: String,
    pub boxes_to_mask: Vec<[f32; 4]>,
}

/// Runs the text pipeline over `page.recognised_text` and derives the
/// bounding boxes to mask from the resulting spans.
///
/// A token box is selected whenever its `[char_start, char_end)` range
/// overlaps any frozen span's range — a token may be partially covered by
/// a span (e.g. OCR merged two words into one token) and is still masked
/// in full, since partial pixel redaction is not meaningful.
pub fn redact_page(page: &OcrPage, policy: Policy, registry: &ReplacementRegistry) -> Result<OcrRedactResult, RedactError> {
    policy.validate()?;

    let mut ctx = RedactionContext::new(policy);
    arbitration::field_context::scan(&page.recognised_text, &mut ctx);
    let raw_spans = runner::run(&page.recognised_text, &mut ctx);
    let frozen = arbitration::run_remaining_stages(raw_spans, &mut ctx, &page.recognised_text);
    let frozen = replacement::assign_replacements(frozen, &ctx, registry);
    let redacted_text = replacement::redact_text(&page.recognised_text, &frozen);

    let spans = frozen.into_vec();

    let mut boxes_to_mask: Vec<[f32; 4]> = page
        .token_boxes
        .iter()
        .filter(|tb| spans.iter().any(|s| s.char_start < tb.char_end && tb.char_start < s.char_end))
        .map(|tb| tb.bbox)
        .collect();
    boxes_to_mask.extend(page.face_boxes.iter().map(|fb| fb.bbox));

    Ok(OcrRedactResult { spans, redacted_text, boxes_to_mask })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_box_overlapping_a_span_is_masked() {
        let page = OcrPage {
            recognised_text: "SSN: 456-78-9012".to_string(),
            token_boxes: vec![
                TokenBox { char_start: 0, char_end: 4, bbox: [0.0, 0.0, 10.0, 10.0], confidence: 0.9 },
                TokenBox { char_start: 5, char_end: 16, bbox: [11.0, 0.0, 40.0, 10.0], confidence: 0.95 },
            ],
            face_boxes: vec![],
        };
        let registry = ReplacementRegistry::new();
        let result = redact_page(&page, Policy::hipaa_strict(), &registry).unwrap();
        assert_eq!(result.boxes_to_mask, vec![[11.0, 0.0, 40.0, 10.0]]);
    }

    #[test]
    fn face_boxes_are_always_included() {
        let page = OcrPage {
            recognised_text: "no phi here".to_string(),
            token_boxes: vec![],
            face_boxes: vec![FaceBox { bbox: [1.0, 2.0, 3.0, 4.0], confidence: 0.8 }],
        };
        let registry = ReplacementRegistry::new();
        let result = redact_page(&page, Policy::hipaa_strict(), &registry).unwrap();
        assert_eq!(result.boxes_to_mask, vec![[1.0, 2.0, 3.0, 4.0]]);
    }

    #[test]
    fn redacted_text_is_substituted_same_as_the_text_pipeline() {
        let page = OcrPage {
            recognised_text: "SSN: 456-78-9012".to_string(),
            token_boxes: vec![],
            face_boxes: vec![],
        };
        let registry = ReplacementRegistry::new();
        let result = redact_page(&page, Policy::hipaa_strict(), &registry).unwrap();
        assert!(result.redacted_text.contains("[SSN-1]"));
    }
}
