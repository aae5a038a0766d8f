//! Crate-wide error taxonomy.
//!
//! Each public-facing boundary gets its own `thiserror` enum rather than one
//! monolithic error type, matching the per-module convention used throughout
//! the pipeline (`PolicyError`, `TrustError`, `StreamError`, ...). `RedactError`
//! is the top-level error returned by the orchestrator and composes the rest
//! via `#[from]`.

use thiserror::Error;

/// Errors surfaced by [`crate::policy::Policy`] parsing/validation.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("unknown policy field: {0}")]
    UnknownField(String),

    #[error("invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("sensitivity threshold for {0:?} must be in [0,1]")]
    ThresholdOutOfRange(crate::span::FilterType),

    #[error("policy JSON is malformed: {0}")]
    Malformed(String),
}

/// Errors surfaced by the trust bundle (C7) — hashing, Merkle construction,
/// receipt (de)serialisation.
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("failed to canonicalise manifest: {0}")]
    Canonicalization(String),

    #[error("I/O error while writing receipt: {0}")]
    Io(#[from] std::io::Error),

    #[error("receipt bundle is truncated or malformed")]
    MalformedBundle,

    #[error("receipt length prefix exceeds bundle size")]
    LengthPrefixOverflow,
}

/// Errors surfaced by the streaming adapter (C9).
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("redaction failed mid-stream: {0}")]
    Redact(#[from] Box<RedactError>),

    #[error("stream cancelled before a chunk could be flushed")]
    CancelledMidFlush,
}

/// Top-level error returned by [`crate::orchestrator::redact`].
#[derive(Error, Debug)]
pub enum RedactError {
    #[error("invalid policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    #[error("input is {actual} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { actual: usize, limit: usize },

    #[error("input is not valid UTF-8 at byte {0}")]
    NotUtf8(usize),

    #[error("span budget of {limit} exceeded ({actual} spans collected)")]
    SpanBudgetExceeded { actual: usize, limit: usize },

    #[error("cancelled before replacement could be committed")]
    CancelledBeforeReplacement,

    #[error("trust bundle error: {0}")]
    Trust(#[from] TrustError),
}

/// Non-fatal warnings attached to a [`crate::orchestrator::RedactResult`].
///
/// These never abort the call (per §7's error taxonomy: detector faults and
/// receipt faults degrade gracefully rather than failing the whole request).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RedactWarning {
    #[error("detector {source} was skipped: policy disabled it")]
    DetectorSkipped { source: String },

    #[error("detector {source} faulted: {reason}")]
    DetectorFaulted { source: String, reason: String },

    #[error("receipt could not be produced: {reason}")]
    ReceiptFailure { reason: String },

    #[error("arbitration anomaly in stage {stage}: {detail}")]
    ArbitrationAnomaly { stage: String, detail: String },

    #[error("soft deadline exceeded before all detectors ran; result is partial")]
    DeadlineExceeded,
}
