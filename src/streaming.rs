//! Streaming adapter (C9, spec §4.8).
//!
//! Wraps the orchestrator (C8) for producer/consumer scenarios: chunks come
//! in one at a time and redacted output flows out incrementally, while a
//! rolling window of `policy.streaming_buffer` bytes is retained so that a
//! detector match straddling a chunk boundary is still found. A span is
//! only considered "closed" — safe to flush — once the window has advanced
//! past its `char_end`; until then it stays buffered and may still be
//! revised by a later chunk's context.
//!
//! Invariant (spec §4.8): every byte of input appears exactly once across
//! the emitted chunks, in order.

use crate::context::RedactionContext;
use crate::error::StreamError;
use crate::policy::Policy;
use crate::replacement::ReplacementRegistry;
use crate::span::Span;
use crate::{arbitration, replacement, runner};

/// One unit of streamed output: the redacted text safe to emit now, and the
/// spans whose ranges fell entirely within the flushed region.
#[derive(Debug, Clone)]
pub struct ChunkResult {
    pub redacted_chunk: String,
    pub spans_closed: Vec<Span>,
}

/// Cooperative, chunk-at-a-time redaction. Holds a growing buffer of
/// not-yet-flushed source text; `push` feeds a chunk in and returns the
/// portion now safe to release.
pub struct StreamingRedactor {
    policy: Policy,
    ctx: RedactionContext,
    registry: ReplacementRegistry,
    buffer: String,
    /// Byte offset into `buffer` of the first byte not yet released.
    released_up_to: usize,
    cancelled: bool,
}

impl StreamingRedactor {
    pub fn new(policy: Policy) -> Self {
        let ctx = RedactionContext::new(policy.clone());
        StreamingRedactor {
            policy,
            ctx,
            registry: ReplacementRegistry::new(),
            buffer: String::new(),
            released_up_to: 0,
            cancelled: false,
        }
    }

    /// Feeds one chunk of input. Returns the portion of redacted output
    /// that the rolling window now guarantees is final.
    pub fn push(&mut self, chunk: &str) -> Result<ChunkResult, StreamError> {
        if self.cancelled {
            return Err(StreamError::CancelledMidFlush);
        }
        self.buffer.push_str(chunk);
        self.redact_and_release(false)
    }

    /// Cooperative cancellation: flushes every span fully contained in the
    /// window, then closes the stream. No further `push` calls are valid
    /// after this.
    pub fn cancel(&mut self) -> Result<ChunkResult, StreamError> {
        let result = self.redact_and_release(true)?;
        self.cancelled = true;
        Ok(result)
    }

    fn redact_and_release(&mut self, flush_all: bool) -> Result<ChunkResult, StreamError> {
        let window_start = self.released_up_to;
        let window = &self.buffer[window_start..];

        let mut ctx = RedactionContext::with_ids(self.policy.clone(), self.ctx.session_id, self.ctx.document_id);
        arbitration::field_context::scan(window, &mut ctx);
        let raw_spans = runner::run(window, &mut ctx);
        let frozen = arbitration::run_remaining_stages(raw_spans, &mut ctx, window);
        let frozen = replacement::assign_replacements(frozen, &ctx, &self.registry);

        let safe_boundary = if flush_all {
            window.len()
        } else {
            safe_release_boundary(window, frozen.as_slice(), self.policy.streaming_buffer)
        };

        let closed: Vec<Span> = frozen
            .as_slice()
            .iter()
            .filter(|s| s.char_end <= safe_boundary)
            .cloned()
            .collect();

        let redacted_chunk = {
            let mut closed_frozen_spans = closed.clone();
            crate::span::sort_by_start(&mut closed_frozen_spans);
            let mut out = String::with_capacity(safe_boundary);
            let mut cursor = 0usize;
            for span in &closed_frozen_spans {
                out.push_str(&window[cursor..span.char_start]);
                out.push_str(span.replacement.as_deref().unwrap_or(""));
                cursor = span.char_end;
            }
            out.push_str(&window[cursor..safe_boundary]);
            out
        };

        self.released_up_to = window_start + safe_boundary;
        self.ctx.statistics.anomalies.extend(ctx.statistics.anomalies);

        // Drop the now-released prefix so a long-lived stream's buffer stays
        // bounded by `streaming_buffer` plus whatever arrived since the last
        // release, rather than retaining the whole history.
        self.buffer.drain(..self.released_up_to);
        self.released_up_to = 0;

        Ok(ChunkResult { redacted_chunk, spans_closed: closed })
    }
}

/// The byte offset (relative to `window`) up to which it's safe to release
/// text: either the end of the last span that closes entirely before the
/// trailing `streaming_buffer`-sized region, or the start of that trailing
/// region if no span reaches that far, whichever is smaller. Keeping a
/// `streaming_buffer`-sized tail unreleased gives a later chunk's detectors
/// room to still find a match that straddles the current boundary.
fn safe_release_boundary(window: &str, spans: &[Span], streaming_buffer: usize) -> usize {
    let retain_from = window.len().saturating_sub(streaming_buffer);
    spans
        .iter()
        .filter(|s| s.char_end <= retain_from)
        .map(|s| s.char_end)
        .max()
        .unwrap_or(0)
        .min(retain_from)
}
