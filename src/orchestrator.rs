//! Orchestrator (C8, spec §4.7): the public entry point tying the whole
//! pipeline together.
//!
//! ```text
//! text --field_context::scan--> ctx.field_map
//!      --runner::run (C4)-----> raw spans
//!      --arbitration (C5)------> frozen spans
//!      --replacement (C6)------> frozen spans with replacement set
//!      --redact_text-----------> redacted text
//!      --trust_bundle (C7, opt)-> receipt
//! ```
//!
//! Determinism (spec §4.7): for identical `(text, policy, ctx scope)`, the
//! output is byte-identical — every stage here is either pure or, in C4's
//! case, order-independent before the deterministic sort in arbitration
//! stage 11.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::arbitration::{self, field_context};
use crate::config::accel_disabled;
use crate::context::RedactionContext;
use crate::error::{RedactError, RedactWarning};
use crate::policy::Policy;
use crate::replacement::{self, ReplacementRegistry};
use crate::runner;
use crate::span::Span;
use crate::trust_bundle::{self, Receipt};

/// Result of a single [`redact`] call (spec §4.7).
#[derive(Debug, Clone)]
pub struct RedactResult {
    pub text: String,
    pub spans: Vec<Span>,
    pub breakdown: BTreeMap<&'static str, usize>,
    pub receipt: Option<Receipt>,
    pub warnings: Vec<RedactWarning>,
    /// True when a soft deadline cut detection short before all detectors
    /// could run to completion (spec §5, "Cancellation and timeouts").
    pub partial: bool,
}

/// Runs the full redaction pipeline over `text` under `policy`.
///
/// `ctx` is created fresh with `RedactionContext::new(policy.clone())` when
/// not supplied; pass one explicitly to control `session_id`/`document_id`
/// (needed for `PER-SESSION` replacement consistency and for chaining
/// receipts via `prior_root`).
pub fn redact(
    text: &str,
    policy: Policy,
    ctx: Option<RedactionContext>,
    registry: &ReplacementRegistry,
    prior_root: Option<String>,
) -> Result<RedactResult, RedactError> {
    policy.validate()?;

    if text.len() > policy.max_document_bytes {
        return Err(RedactError::InputTooLarge {
            actual: text.len(),
            limit: policy.max_document_bytes,
        });
    }

    // Spec §5, "Cancellation and timeouts": a deadline of zero leaves no
    // room even to start detection, so the call aborts before any partial
    // replacement could happen rather than returning an empty-detection
    // result dressed up as success.
    if policy.deadline_ms == Some(0) {
        return Err(RedactError::CancelledBeforeReplacement);
    }
    let deadline = policy.deadline_ms.map(|ms| Instant::now() + Duration::from_millis(ms));

    let mut ctx = ctx.unwrap_or_else(|| RedactionContext::new(policy.clone()));
    let max_spans = ctx.policy.max_spans_per_doc;

    info!(document_id = %ctx.document_id, bytes = text.len(), accel_disabled = accel_disabled(), "starting redaction");

    field_context::scan(text, &mut ctx);

    let (raw_spans, partial) = runner::run_with_deadline(text, &mut ctx, deadline);
    if raw_spans.len() > max_spans {
        return Err(RedactError::SpanBudgetExceeded { actual: raw_spans.len(), limit: max_spans });
    }

    let frozen = arbitration::run_remaining_stages(raw_spans, &mut ctx, text);
    let frozen = replacement::assign_replacements(frozen, &ctx, registry);
    let redacted_text = replacement::redact_text(text, &frozen);

    let mut breakdown: BTreeMap<&'static str, usize> = BTreeMap::new();
    for span in frozen.as_slice() {
        *breakdown.entry(span.filter_type.token()).or_insert(0) += 1;
    }

    let mut warnings: Vec<RedactWarning> = Vec::new();
    for (source, reason) in &ctx.statistics.detector_faults {
        let warning = if reason.contains("policy disabled") {
            RedactWarning::DetectorSkipped { source: source.clone() }
        } else {
            RedactWarning::DetectorFaulted { source: source.clone(), reason: reason.clone() }
        };
        warn!(source = %source, reason = %reason, "detector did not complete normally");
        warnings.push(warning);
    }
    for anomaly in &ctx.statistics.anomalies {
        warnings.push(RedactWarning::ArbitrationAnomaly { stage: "cross_type_reasoner".to_string(), detail: anomaly.clone() });
    }
    if partial {
        warn!(document_id = %ctx.document_id, "soft deadline exceeded before every detector ran; result is partial");
        warnings.push(RedactWarning::DeadlineExceeded);
    }

    let receipt = if ctx.policy.emit_receipt {
        match trust_bundle::build_receipt_now(text, &redacted_text, frozen.as_slice(), &ctx.policy, ctx.document_id, prior_root) {
            Ok(r) => Some(r),
            Err(e) => {
                warnings.push(RedactWarning::ReceiptFailure { reason: e.to_string() });
                None
            }
        }
    } else {
        None
    };

    Ok(RedactResult {
        text: redacted_text,
        spans: frozen.into_vec(),
        breakdown,
        receipt,
        warnings,
        partial,
    })
}
