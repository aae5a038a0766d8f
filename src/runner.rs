//! Parallel detector runner (C4, spec §4.3, §5).
//!
//! Fans a document out to every enabled detector. Detectors are pure and
//! side-effect-free, so the natural concurrency unit is "one thread per
//! detector, joined before arbitration" via [`std::thread::scope`] — no
//! detector ever needs to see another's output, so there's nothing to
//! synchronise beyond the final join. A detector that panics is caught and
//! recorded as [`crate::error::RedactWarning::DetectorFaulted`] rather than
//! aborting the whole request (spec §7). [`crate::config::accel_disabled`]
//! collapses this to a sequential loop for parity testing, which spec §5
//! explicitly permits without changing observable behaviour.
//!
//! Documents larger than [`crate::config::DEFAULT_PARAGRAPH_SPLIT_BYTES`]
//! are split on paragraph boundaries before the fan-out and the per-chunk
//! results are stitched back together with byte-offset adjustment, keeping
//! peak working-set size and single-detector worst-case latency bounded on
//! very large inputs.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::config::{accel_disabled, DEFAULT_PARAGRAPH_SPLIT_BYTES};
use crate::context::RedactionContext;
use crate::detectors::{Detector, REGISTRY};
use crate::span::Span;

/// Runs every enabled detector over `text`, returning the concatenated raw
/// span set and recording detector faults/skips into `ctx.statistics`.
pub fn run(text: &str, ctx: &mut RedactionContext) -> Vec<Span> {
    run_with_deadline(text, ctx, None).0
}

/// Same as [`run`], but stops handing new detectors work once `deadline`
/// has passed (spec §5, "Cancellation and timeouts": "skip any detector
/// that has not yet started, let in-flight detectors finish"). Returns the
/// collected spans plus whether the deadline was hit before every detector
/// ran, so the orchestrator can annotate the result as `partial`.
pub fn run_with_deadline(text: &str, ctx: &mut RedactionContext, deadline: Option<Instant>) -> (Vec<Span>, bool) {
    let chunks = split_into_chunks(text);
    let mut spans = Vec::new();
    let mut hit_deadline = false;
    for (offset, chunk) in chunks {
        let (chunk_spans, chunk_hit) = run_chunk(chunk, ctx, deadline);
        hit_deadline |= chunk_hit;
        spans.extend(chunk_spans.into_iter().map(|s| shift(s, offset)));
        if hit_deadline {
            break;
        }
    }
    (spans, hit_deadline)
}

fn run_chunk(chunk: &str, ctx: &mut RedactionContext, deadline: Option<Instant>) -> (Vec<Span>, bool) {
    let mut enabled: Vec<&Detector> = Vec::new();
    let mut hit_deadline = false;
    for d in REGISTRY {
        if deadline.is_some_and(|by| Instant::now() >= by) {
            hit_deadline = true;
            ctx.statistics.record_fault(d.name, "soft deadline exceeded before detector started".to_string());
            continue;
        }
        if ctx.policy.is_enabled(detector_primary_type(d.name)) {
            enabled.push(d);
        } else {
            ctx.statistics.record_fault(d.name, "policy disabled this filter type".to_string());
        }
    }

    // Detectors only ever need a shared view of the context; reborrowing as
    // `&RedactionContext` here lets every spawned thread hold its own copy
    // of that shared reference without aliasing `ctx` mutably.
    let ctx_ref: &RedactionContext = ctx;
    let mut faults: Vec<(&'static str, String)> = Vec::new();

    let spans = if accel_disabled() {
        let mut spans = Vec::new();
        for d in &enabled {
            match panic::catch_unwind(AssertUnwindSafe(|| (d.detect)(chunk, ctx_ref))) {
                Ok(found) => spans.extend(found),
                Err(payload) => faults.push((d.name, panic_message(&payload))),
            }
        }
        spans
    } else {
        std::thread::scope(|scope| {
            let handles: Vec<_> = enabled
                .iter()
                .map(|d| {
                    scope.spawn(move || {
                        let result = panic::catch_unwind(AssertUnwindSafe(|| (d.detect)(chunk, ctx_ref)));
                        (d.name, result)
                    })
                })
                .collect();

            let mut spans = Vec::new();
            for handle in handles {
                match handle.join() {
                    Ok((_, Ok(found))) => spans.extend(found),
                    Ok((name, Err(payload))) => faults.push((name, panic_message(&payload))),
                    Err(_) => faults.push(("unknown", "detector thread panicked during join".to_string())),
                }
            }
            spans
        })
    };

    for (name, reason) in faults {
        ctx.statistics.record_fault(name, reason);
    }
    (spans, hit_deadline)
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "detector panicked with non-string payload".to_string()
    }
}

/// Maps a registry entry to the `FilterType` its name corresponds to, for
/// policy `enabled_filters` checks. Detectors that can emit more than one
/// type (name, date, medicare/medicaid) are keyed by their most specific
/// category; `is_enabled` is consulted again by the confidence modifier
/// stage for any span whose actual type differs.
fn detector_primary_type(name: &str) -> crate::span::FilterType {
    use crate::span::FilterType::*;
    match name {
        "ssn" => Ssn,
        "mrn" => Mrn,
        "phone" => Phone,
        "fax" => Fax,
        "email" => Email,
        "address" => Address,
        "zip" => Zip,
        "medicare" => Medicare,
        "medicaid" => Medicaid,
        "dea" => Dea,
        "npi" => Npi,
        "account_number" => AccountNumber,
        "credit_card" => CreditCard,
        "bank_account" => BankAccount,
        "drivers_license" => DriversLicense,
        "passport" => Passport,
        "health_plan" => HealthPlan,
        "ip" => Ip,
        "url" => Url,
        "device_id" => DeviceId,
        "vehicle" => Vehicle,
        "biometric" => Biometric,
        "age_over_89" => AgeOver89,
        "unique_id" => UniqueId,
        "hospital" => Hospital,
        "name" => Name,
        "date" => Date,
        _ => UniqueId,
    }
}

fn shift(mut span: Span, offset: usize) -> Span {
    if offset == 0 {
        return span;
    }
    span.char_start += offset;
    span.char_end += offset;
    span
}

/// Splits `text` into `(byte_offset, chunk)` pairs on blank-line paragraph
/// boundaries, accumulating paragraphs into chunks no larger than
/// `DEFAULT_PARAGRAPH_SPLIT_BYTES`. Returns a single whole-text chunk when
/// `text` is already under the threshold.
fn split_into_chunks(text: &str) -> Vec<(usize, &str)> {
    if text.len() <= DEFAULT_PARAGRAPH_SPLIT_BYTES {
        return vec![(0, text)];
    }

    let mut chunks = Vec::new();
    let mut chunk_start = 0usize;
    let mut search_from = 0usize;

    loop {
        let boundary = text[search_from..].find("\n\n").map(|p| search_from + p + 2);
        let at_end = boundary.is_none();
        let candidate_end = boundary.unwrap_or(text.len());

        if candidate_end - chunk_start >= DEFAULT_PARAGRAPH_SPLIT_BYTES || at_end {
            if candidate_end > chunk_start {
                chunks.push((chunk_start, &text[chunk_start..candidate_end]));
            }
            chunk_start = candidate_end;
        }

        match boundary {
            Some(b) => search_from = b,
            None => break,
        }
    }

    if chunks.is_empty() {
        chunks.push((0, text));
    }
    chunks
}
