//! `vulpes-redact` — a HIPAA Safe Harbor PHI redaction engine for clinical
//! free text.
//!
//! The pipeline, end to end:
//!
//! ```text
//! text -> field_context::scan (C5 stage 1, populates ctx.field_map)
//!      -> runner::run         (C4, parallel detectors -> raw spans)
//!      -> arbitration::run_remaining_stages (C5 stages 2-11 -> frozen spans)
//!      -> replacement::assign_replacements  (C6 -> replacement text)
//!      -> replacement::redact_text          (-> final document)
//!      -> trust_bundle::build_receipt_now   (C7, optional)
//! ```
//!
//! [`orchestrator::redact`] drives the whole thing for a single document;
//! [`streaming::StreamingRedactor`] wraps it for chunk-at-a-time input.

pub mod arbitration;
pub mod canonical;
pub mod config;
pub mod context;
pub mod detectors;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod policy;
pub mod replacement;
pub mod runner;
pub mod span;
pub mod streaming;
pub mod trust_bundle;
pub mod vision;
pub mod vocabulary;

pub use context::RedactionContext;
pub use error::{PolicyError, RedactError, RedactWarning, StreamError, TrustError};
pub use orchestrator::{redact, RedactResult};
pub use policy::Policy;
pub use replacement::ReplacementRegistry;
pub use span::{FilterType, Span};
pub use streaming::StreamingRedactor;
