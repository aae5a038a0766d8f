//! Arbitration stage 8 — vector disambiguation (spec §4.4 stage 8).
//!
//! When a span carries `ambiguous_with`, it is scored against the field
//! label (already applied by stage 5's promoter when the label matches) and
//! the surrounding n-gram context; the winning type is committed and
//! `disambiguation_score` records the margin. Spans without ambiguity pass
//! through untouched.

use crate::span::{FilterType, Span};

/// Keywords in `context` that lend support to a candidate type, beyond what
/// the field-context promoter already resolved via an explicit label.
fn keyword_support(filter_type: FilterType, context: &str) -> f32 {
    let lower = context.to_lowercase();
    let hits: &[&str] = match filter_type {
        FilterType::Ssn => &["ssn", "social security"],
        FilterType::Mrn => &["mrn", "medical record"],
        FilterType::AccountNumber => &["account", "acct"],
        FilterType::HealthPlan => &["policy", "insurance", "plan"],
        FilterType::Dea => &["dea"],
        FilterType::Npi => &["npi", "provider"],
        FilterType::Passport => &["passport"],
        FilterType::DriversLicense => &["license", "dl#"],
        _ => &[],
    };
    if hits.iter().any(|h| lower.contains(h)) {
        1.0
    } else {
        0.0
    }
}

pub fn apply(mut spans: Vec<Span>) -> Vec<Span> {
    for span in &mut spans {
        let Some(alternatives) = span.ambiguous_with.clone() else {
            continue;
        };
        if alternatives.is_empty() {
            continue;
        }
        let current_score = keyword_support(span.filter_type, &span.context);
        let mut best_type = span.filter_type;
        let mut best_score = current_score;
        for &alt in &alternatives {
            let score = keyword_support(alt, &span.context);
            if score > best_score {
                best_score = score;
                best_type = alt;
            }
        }
        span.disambiguation_score = Some(best_score - current_score.min(best_score));
        if best_type != span.filter_type {
            span.filter_type = best_type;
            span.priority = best_type.default_priority();
            span.touched_by("vector_disambiguation");
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn commits_type_supported_by_context_keywords() {
        let mut span = Span::new("123456789", "123456789", 0, 9, FilterType::Mrn, 0.6, "mrn_detector");
        span.context = "patient social security number 123456789 on file".to_string();
        span.ambiguous_with = Some(BTreeSet::from([FilterType::Ssn]));
        let result = apply(vec![span]);
        assert_eq!(result[0].filter_type, FilterType::Ssn);
        assert!(result[0].disambiguation_score.is_some());
    }

    #[test]
    fn leaves_unambiguous_span_untouched() {
        let span = Span::new("x", "x", 0, 1, FilterType::Name, 0.7, "name_detector");
        let result = apply(vec![span]);
        assert!(result[0].disambiguation_score.is_none());
    }

    #[test]
    fn keeps_original_type_when_no_alternative_scores_higher() {
        let mut span = Span::new("7834921", "7834921", 0, 7, FilterType::Mrn, 0.8, "mrn_detector");
        span.context = "mrn 7834921 noted in chart".to_string();
        span.ambiguous_with = Some(BTreeSet::from([FilterType::AccountNumber]));
        let result = apply(vec![span]);
        assert_eq!(result[0].filter_type, FilterType::Mrn);
    }
}
