//! Arbitration stage 5 — field-context promoter (spec §4.4 stage 5).
//!
//! Any span falling within a `ctx.field_map` entry inherits a confidence
//! bonus and, if ambiguous, its filter type is resolved by the field label
//! (e.g. digits following "SSN:" become SSN even if they also match MRN).

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

const PROMOTION_BONUS: f32 = 0.08;

/// The filter type a canonical field label most strongly implies, used to
/// resolve an ambiguous span (one whose detector recorded alternatives in
/// `ambiguous_with`) in favour of the field's own declared category.
fn expected_type_for_label(canonical: &str) -> Option<FilterType> {
    match canonical {
        "SSN" => Some(FilterType::Ssn),
        "MRN" => Some(FilterType::Mrn),
        "DOB" => Some(FilterType::Date),
        "Phone" => Some(FilterType::Phone),
        "Fax" => Some(FilterType::Fax),
        "Address" => Some(FilterType::Address),
        "Email" => Some(FilterType::Email),
        "Account" => Some(FilterType::AccountNumber),
        "Dea" => Some(FilterType::Dea),
        "License" => Some(FilterType::DriversLicense),
        "Passport" => Some(FilterType::Passport),
        "HealthPlan" => Some(FilterType::HealthPlan),
        _ => None,
    }
}

pub fn apply(mut spans: Vec<Span>, ctx: &RedactionContext) -> Vec<Span> {
    for span in &mut spans {
        let Some(field) = ctx.field_at(span.char_start) else {
            continue;
        };
        span.confidence = (span.confidence + PROMOTION_BONUS).min(1.0);
        if let Some(expected) = expected_type_for_label(&field.canonical) {
            let ambiguous = span
                .ambiguous_with
                .as_ref()
                .is_some_and(|alts| alts.contains(&expected));
            if span.filter_type != expected && ambiguous {
                span.filter_type = expected;
                span.priority = expected.default_priority();
                span.touched_by("field_context_promoter");
            }
        }
    }
    spans
}
