//! Arbitration pipeline (C5, spec §4.4): a fixed, ordered sequence of eleven
//! stages, each a pure function over `(span set, context)`. Stage 1 (field
//! context) is invoked separately by the orchestrator *before* the parallel
//! detector runner (C4), since several detectors are themselves
//! field-context-gated; [`run_remaining_stages`] covers stages 2 through 11.
//!
//! Failure semantics (spec §4.4): arbitration is pure and total. Stages
//! never fail; they only prune or edit spans. The one place an arbitration
//! stage logs rather than silently acts is stage 9's same-source merges,
//! recorded to `ctx.statistics.anomalies`.

pub mod allcaps_filter;
pub mod confidence_modifier;
pub mod cross_type_reasoner;
pub mod disambiguation;
pub mod field_context;
pub mod field_label_whitelist;
pub mod field_promoter;
pub mod freeze;
pub mod post_filter;
pub mod span_enhancer;
pub mod vocabulary_filter;

use crate::context::RedactionContext;
use crate::span::Span;
use freeze::FrozenSpans;

/// Runs arbitration stages 2-11 over the raw span set collected by C4.
/// Stage 1 (`field_context::scan`) must already have populated
/// `ctx.field_map` before C4 ran.
pub fn run_remaining_stages(spans: Vec<Span>, ctx: &mut RedactionContext, source: &str) -> FrozenSpans {
    let spans = field_label_whitelist::apply(spans, ctx);
    ctx.statistics.record_stage("field_label_whitelist", spans.len());

    let spans = vocabulary_filter::apply(spans, ctx, source);
    ctx.statistics.record_stage("vocabulary_filter", spans.len());

    let spans = allcaps_filter::apply(spans, ctx);
    ctx.statistics.record_stage("allcaps_filter", spans.len());

    let spans = field_promoter::apply(spans, ctx);
    ctx.statistics.record_stage("field_promoter", spans.len());

    let spans = confidence_modifier::apply(spans, ctx);
    ctx.statistics.record_stage("confidence_modifier", spans.len());

    let spans = span_enhancer::apply(spans, source);
    ctx.statistics.record_stage("span_enhancer", spans.len());

    let spans = disambiguation::apply(spans);
    ctx.statistics.record_stage("disambiguation", spans.len());

    let before_reasoner = spans.len();
    let spans = cross_type_reasoner::apply(spans, source);
    if spans.len() < before_reasoner {
        ctx.statistics.record_anomaly(format!(
            "cross_type_reasoner merged/resolved {} overlapping span(s)",
            before_reasoner - spans.len()
        ));
    }
    ctx.statistics.record_stage("cross_type_reasoner", spans.len());

    let spans = post_filter::apply(spans, ctx, source);
    ctx.statistics.record_stage("post_filter", spans.len());

    FrozenSpans::freeze(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;
    use crate::span::FilterType;

    #[test]
    fn full_pipeline_resolves_overlap_and_freezes() {
        let source = "SSN: 456-78-9012";
        let mut ctx = RedactionContext::new(Policy::default());
        field_context::scan(source, &mut ctx);

        let ssn = Span::new("456-78-9012", "456-78-9012", 5, 16, FilterType::Ssn, 0.97, "ssn_detector");
        let mrn_guess = Span::new("456-78-9012", "456-78-9012", 5, 16, FilterType::Mrn, 0.6, "mrn_detector");

        let frozen = run_remaining_stages(vec![ssn, mrn_guess], &mut ctx, source);
        assert_eq!(frozen.len(), 1);
        assert_eq!(frozen.as_slice()[0].filter_type, FilterType::Ssn);
        assert!(!ctx.statistics.anomalies.is_empty());
    }

    #[test]
    fn empty_input_produces_empty_frozen_set() {
        let mut ctx = RedactionContext::new(Policy::default());
        let frozen = run_remaining_stages(vec![], &mut ctx, "");
        assert!(frozen.is_empty());
    }
}
