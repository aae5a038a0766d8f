//! HEALTH_PLAN detector (spec §4.1(a)): insurance policy / group numbers,
//! field-context gated, at priority 800.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::{make_span, near_field_label};

const SOURCE: &str = "health_plan_detector";

static POLICY_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z0-9]{6,14}\b").unwrap());

pub fn detect(text: &str, ctx: &RedactionContext) -> Vec<Span> {
    POLICY_CANDIDATE
        .find_iter(text)
        .filter(|m| near_field_label(ctx, m.start(), &["HealthPlan", "Insurance"]))
        .map(|m| make_span(text, m.as_str(), m.start(), m.end(), FilterType::HealthPlan, 0.83, SOURCE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FieldLabel;
    use crate::policy::Policy;

    #[test]
    fn detects_policy_number_near_label() {
        let mut c = RedactionContext::new(Policy::default());
        c.field_map.push(FieldLabel {
            canonical: "HealthPlan".to_string(),
            label_start: 0,
            label_end: 14,
            value_start: 14,
            value_end: 30,
        });
        let spans = detect("Policy Number: HP8823114", &c);
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn ignores_without_field_context() {
        let spans = detect("ticket HP8823114 closed", &RedactionContext::new(Policy::default()));
        assert!(spans.is_empty());
    }
}
