//! Span model and priority tiers (C1, spec §3.1–§3.2).
//!
//! A [`Span`] is the atomic unit every detector produces and every
//! arbitration stage (C5) consumes. Invariants are enforced at the edges
//! (detectors construct via [`Span::new`], arbitration's final "sort and
//! freeze" stage asserts non-overlap) rather than on every field mutation,
//! since intermediate arbitration stages are explicitly allowed to mutate
//! confidence/priority/type before the set is frozen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// HIPAA Safe Harbor categories plus the extensions named in spec §3.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum FilterType {
    Name,
    FirstName,
    LastName,
    Date,
    Ssn,
    Mrn,
    Phone,
    Fax,
    Email,
    Address,
    Zip,
    Medicare,
    Medicaid,
    Dea,
    Npi,
    AccountNumber,
    CreditCard,
    BankAccount,
    DriversLicense,
    Passport,
    HealthPlan,
    Ip,
    Url,
    DeviceId,
    Vehicle,
    Biometric,
    AgeOver89,
    UniqueId,
    Hospital,
}

impl FilterType {
    /// Short, stable category token used in replacement strings, e.g. `NAME`.
    pub fn token(&self) -> &'static str {
        match self {
            FilterType::Name => "NAME",
            FilterType::FirstName => "FIRST_NAME",
            FilterType::LastName => "LAST_NAME",
            FilterType::Date => "DATE",
            FilterType::Ssn => "SSN",
            FilterType::Mrn => "MRN",
            FilterType::Phone => "PHONE",
            FilterType::Fax => "FAX",
            FilterType::Email => "EMAIL",
            FilterType::Address => "ADDRESS",
            FilterType::Zip => "ZIP",
            FilterType::Medicare => "MEDICARE",
            FilterType::Medicaid => "MEDICAID",
            FilterType::Dea => "DEA",
            FilterType::Npi => "NPI",
            FilterType::AccountNumber => "ACCOUNT_NUMBER",
            FilterType::CreditCard => "CREDIT_CARD",
            FilterType::BankAccount => "BANK_ACCOUNT",
            FilterType::DriversLicense => "DRIVERS_LICENSE",
            FilterType::Passport => "PASSPORT",
            FilterType::HealthPlan => "HEALTH_PLAN",
            FilterType::Ip => "IP",
            FilterType::Url => "URL",
            FilterType::DeviceId => "DEVICE_ID",
            FilterType::Vehicle => "VEHICLE",
            FilterType::Biometric => "BIOMETRIC",
            FilterType::AgeOver89 => "AGE_OVER_89",
            FilterType::UniqueId => "UNIQUE_ID",
            FilterType::Hospital => "HOSPITAL",
        }
    }

    /// Whether this category belongs to the "name family" that the
    /// vocabulary filter (arbitration stage 3) may suppress in favour of a
    /// medical term covering the same range.
    pub fn is_name_family(&self) -> bool {
        matches!(self, FilterType::Name | FilterType::FirstName | FilterType::LastName)
    }

    /// The default priority tier for this category, per spec §3.2. Detectors
    /// may assign a different priority when format confirmation downgrades
    /// or upgrades trust (e.g. an unvalidated checksum), but this is the
    /// baseline every detector starts from.
    pub fn default_priority(&self) -> i32 {
        match self {
            FilterType::Ssn | FilterType::CreditCard | FilterType::Medicare
            | FilterType::Medicaid | FilterType::Npi => 1000,

            FilterType::Mrn | FilterType::AccountNumber | FilterType::Dea
            | FilterType::HealthPlan | FilterType::DriversLicense
            | FilterType::Passport | FilterType::BankAccount => 800,

            FilterType::Email | FilterType::Url | FilterType::Ip => 600,

            FilterType::Phone | FilterType::Fax | FilterType::Date => 500,

            FilterType::Address | FilterType::Zip | FilterType::Hospital => 400,

            FilterType::Name | FilterType::FirstName | FilterType::LastName => 300,

            FilterType::DeviceId | FilterType::Vehicle | FilterType::AgeOver89 => 200,

            FilterType::UniqueId | FilterType::Biometric => 100,
        }
    }
}

/// A sub-classification attached to a DATE span (spec §4.1(c)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateKind {
    Dob,
    Visit,
    Discharge,
    Unspecified,
}

/// The atomic detection unit (spec §3.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Exact substring that matched, after OCR-confusion normalisation.
    pub text: String,
    /// The substring exactly as it appears in the untouched source.
    pub original_value: String,
    /// Half-open byte offset range into the source: `[char_start, char_end)`.
    pub char_start: usize,
    pub char_end: usize,
    pub filter_type: FilterType,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Priority tier; higher wins overlap resolution (spec §3.2, §4.4 stage 9).
    pub priority: i32,
    /// Up to ~32 characters of context surrounding the match.
    pub context: String,
    /// Identifier of the detector that produced this span; the audit anchor.
    pub match_source: String,
    /// The pattern id that fired, if the detector is pattern-based.
    pub pattern: Option<String>,
    /// Alternative filter types the detector considered plausible.
    pub ambiguous_with: Option<BTreeSet<FilterType>>,
    /// Set by the vector disambiguation stage (C5 stage 8).
    pub disambiguation_score: Option<f32>,
    /// Date-specific sub-tag; `None` for non-DATE spans.
    pub date_kind: Option<DateKind>,
    /// Replacement text; `None` until the replacement service (C6) runs.
    pub replacement: Option<String>,
    /// Ordered names of arbitration stages that mutated this span.
    pub stage_history: Vec<String>,
}

impl Span {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: impl Into<String>,
        original_value: impl Into<String>,
        char_start: usize,
        char_end: usize,
        filter_type: FilterType,
        confidence: f32,
        match_source: impl Into<String>,
    ) -> Self {
        let priority = filter_type.default_priority();
        Span {
            text: text.into(),
            original_value: original_value.into(),
            char_start,
            char_end,
            filter_type,
            confidence: confidence.clamp(0.0, 1.0),
            priority,
            context: String::new(),
            match_source: match_source.into(),
            pattern: None,
            ambiguous_with: None,
            disambiguation_score: None,
            date_kind: None,
            replacement: None,
            stage_history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.char_end - self.char_start
    }

    pub fn is_empty(&self) -> bool {
        self.char_end <= self.char_start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.char_start < other.char_end && other.char_start < self.char_end
    }

    /// Record that an arbitration stage touched this span.
    pub fn touched_by(&mut self, stage: &str) {
        self.stage_history.push(stage.to_string());
    }

    /// Extract ~32 characters of context around `[char_start, char_end)`
    /// from `source`, used by detectors and later by disambiguation.
    pub fn capture_context(source: &str, char_start: usize, char_end: usize) -> String {
        const RADIUS: usize = 16;
        let lo = char_start.saturating_sub(RADIUS);
        let hi = (char_end + RADIUS).min(source.len());
        // Byte offsets must land on char boundaries; widen outward until they do.
        let lo = floor_char_boundary(source, lo);
        let hi = ceil_char_boundary(source, hi);
        source.get(lo..hi).unwrap_or_default().to_string()
    }
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Tie-break total order used by the cross-type reasoner (spec §4.4 stage 9):
/// higher priority wins, then longer span, then higher confidence, then
/// earlier start, then lexicographic `match_source` for determinism.
///
/// Returns `true` if `a` should be kept over `b` when the two overlap.
pub fn wins_over(a: &Span, b: &Span) -> bool {
    if a.priority != b.priority {
        return a.priority > b.priority;
    }
    if a.len() != b.len() {
        return a.len() > b.len();
    }
    if a.confidence != b.confidence {
        return a.confidence > b.confidence;
    }
    if a.char_start != b.char_start {
        return a.char_start < b.char_start;
    }
    a.match_source <= b.match_source
}

/// Sort spans by `char_start` ascending, per spec §4.4 stage 11.
pub fn sort_by_start(spans: &mut [Span]) {
    spans.sort_by(|a, b| {
        a.char_start
            .cmp(&b.char_start)
            .then(a.char_end.cmp(&b.char_end))
            .then(a.match_source.cmp(&b.match_source))
    });
}

/// Assert the final invariant (spec §3.1 invariant 2): pairwise non-overlap,
/// ascending order. Called by arbitration's freeze stage; a violation here
/// means an earlier arbitration stage has a bug, not a recoverable runtime
/// condition — hence `debug_assert!`-style panic rather than a `Result`.
pub fn assert_non_overlapping(spans: &[Span]) {
    for w in spans.windows(2) {
        assert!(
            w[0].char_end <= w[1].char_start,
            "non-overlap invariant violated: {:?} overlaps {:?}",
            w[0],
            w[1]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, ft: FilterType, conf: f32, source: &str) -> Span {
        Span::new("x", "x", start, end, ft, conf, source)
    }

    #[test]
    fn default_priority_matches_tiers() {
        assert_eq!(FilterType::Ssn.default_priority(), 1000);
        assert_eq!(FilterType::Mrn.default_priority(), 800);
        assert_eq!(FilterType::Email.default_priority(), 600);
        assert_eq!(FilterType::Phone.default_priority(), 500);
        assert_eq!(FilterType::Address.default_priority(), 400);
        assert_eq!(FilterType::Name.default_priority(), 300);
        assert_eq!(FilterType::DeviceId.default_priority(), 200);
        assert_eq!(FilterType::UniqueId.default_priority(), 100);
    }

    #[test]
    fn overlap_detection() {
        let a = span(0, 10, FilterType::Name, 0.9, "a");
        let b = span(5, 15, FilterType::Date, 0.9, "b");
        let c = span(10, 20, FilterType::Date, 0.9, "c");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // half-open: touching isn't overlapping
    }

    #[test]
    fn wins_over_priority_first() {
        let high = span(0, 5, FilterType::Ssn, 0.5, "a");
        let low = span(0, 5, FilterType::Name, 0.99, "b");
        assert!(wins_over(&high, &low));
        assert!(!wins_over(&low, &high));
    }

    #[test]
    fn wins_over_length_tiebreak() {
        let long = span(0, 10, FilterType::Name, 0.5, "a");
        let short = span(0, 5, FilterType::Name, 0.99, "b");
        assert!(wins_over(&long, &short));
    }

    #[test]
    fn wins_over_confidence_tiebreak() {
        let a = span(0, 5, FilterType::Name, 0.9, "a");
        let b = span(0, 5, FilterType::Name, 0.5, "b");
        assert!(wins_over(&a, &b));
    }

    #[test]
    fn wins_over_start_then_source_tiebreak() {
        let a = span(0, 5, FilterType::Name, 0.9, "aaa");
        let b = span(1, 6, FilterType::Name, 0.9, "aaa");
        assert!(wins_over(&a, &b));

        let c = span(0, 5, FilterType::Name, 0.9, "aaa");
        let d = span(0, 5, FilterType::Name, 0.9, "zzz");
        assert!(wins_over(&c, &d));
    }

    #[test]
    fn sort_is_stable_ascending() {
        let mut spans = vec![
            span(10, 20, FilterType::Name, 0.9, "b"),
            span(0, 5, FilterType::Ssn, 0.9, "a"),
        ];
        sort_by_start(&mut spans);
        assert_eq!(spans[0].char_start, 0);
        assert_eq!(spans[1].char_start, 10);
    }

    #[test]
    #[should_panic(expected = "non-overlap invariant violated")]
    fn assert_non_overlapping_panics_on_violation() {
        let spans = vec![
            span(0, 10, FilterType::Name, 0.9, "a"),
            span(5, 15, FilterType::Date, 0.9, "b"),
        ];
        assert_non_overlapping(&spans);
    }

    #[test]
    fn capture_context_respects_char_boundaries() {
        let source = "café is nice café";
        // 'é' is multi-byte; pick offsets that would otherwise split it.
        let ctx = Span::capture_context(source, 3, 4);
        assert!(std::str::from_utf8(ctx.as_bytes()).is_ok());
    }
}
