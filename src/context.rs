//! Per-request scratchpad (spec §3.3).
//!
//! A `RedactionContext` is created by the orchestrator (C8) at request entry
//! and discarded at return; it owns no long-lived state. The one piece of
//! state that *does* outlive a single call — the replacement table — lives
//! in [`crate::replacement::ReplacementRegistry`] instead, keyed by
//! `session_id` and guarded by a mutex (spec §5, §9).

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::policy::{Policy, Scope};

/// A labelled field region discovered by the field-context detector
/// (spec §4.4 stage 1), e.g. `Patient:`, `DOB:`, `MRN:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    pub canonical: String,
    pub label_start: usize,
    pub label_end: usize,
    /// The region after the label up to the next line break or field label,
    /// i.e. the value this label is attached to.
    pub value_start: usize,
    pub value_end: usize,
}

/// Per-stage counters, surfaced in tests and in the trust bundle's manifest.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub spans_by_stage: BTreeMap<String, usize>,
    pub anomalies: Vec<String>,
    pub detector_faults: Vec<(String, String)>,
}

impl Statistics {
    pub fn record_stage(&mut self, stage: &str, span_count: usize) {
        self.spans_by_stage.insert(stage.to_string(), span_count);
    }

    pub fn record_anomaly(&mut self, detail: impl Into<String>) {
        self.anomalies.push(detail.into());
    }

    pub fn record_fault(&mut self, source: impl Into<String>, reason: impl Into<String>) {
        self.detector_faults.push((source.into(), reason.into()));
    }
}

/// Per-request scratchpad passed to every detector and arbitration stage.
pub struct RedactionContext {
    pub session_id: Uuid,
    pub document_id: Uuid,
    pub scope: Scope,
    pub policy: Policy,
    pub field_map: Vec<FieldLabel>,
    /// Tokens classified during arbitration as "medical term present in
    /// this document" — an allow-list populated lazily, not at construction.
    pub document_vocabulary: std::collections::HashSet<String>,
    pub statistics: Statistics,
}

impl RedactionContext {
    pub fn new(policy: Policy) -> Self {
        let scope = policy.scope;
        RedactionContext {
            session_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            scope,
            policy,
            field_map: Vec::new(),
            document_vocabulary: std::collections::HashSet::new(),
            statistics: Statistics::default(),
        }
    }

    pub fn with_ids(policy: Policy, session_id: Uuid, document_id: Uuid) -> Self {
        let mut ctx = Self::new(policy);
        ctx.session_id = session_id;
        ctx.document_id = document_id;
        ctx
    }

    /// The field label, if any, whose value region contains `offset`.
    pub fn field_at(&self, offset: usize) -> Option<&FieldLabel> {
        self.field_map
            .iter()
            .find(|f| offset >= f.value_start && offset < f.value_end)
    }
}
