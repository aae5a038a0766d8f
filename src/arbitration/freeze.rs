//! Arbitration stage 11 — sort and freeze (spec §4.4 stage 11, §3.1
//! invariant 5: "Spans are immutable once the final set is produced; only
//! `replacement` is assigned after freezing.").
//!
//! [`FrozenSpans`] is a thin wrapper enforcing that invariant at the type
//! level: every field but `replacement` becomes read-only once a `Vec<Span>`
//! is frozen. The replacement service (C6) is the only caller that mutates
//! through [`FrozenSpans::set_replacement`].

use crate::span::{assert_non_overlapping, sort_by_start, Span};

#[derive(Debug)]
pub struct FrozenSpans(Vec<Span>);

impl FrozenSpans {
    pub fn freeze(mut spans: Vec<Span>) -> Self {
        sort_by_start(&mut spans);
        assert_non_overlapping(&spans);
        FrozenSpans(spans)
    }

    pub fn as_slice(&self) -> &[Span] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The only permitted mutation after freezing: assigning C6's
    /// replacement text to span `index`.
    pub fn set_replacement(&mut self, index: usize, replacement: String) {
        self.0[index].replacement = Some(replacement);
    }

    pub fn into_vec(self) -> Vec<Span> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::FilterType;

    #[test]
    fn freeze_sorts_by_start() {
        let a = Span::new("b", "b", 10, 12, FilterType::Name, 0.9, "x");
        let b = Span::new("a", "a", 0, 2, FilterType::Ssn, 0.9, "y");
        let frozen = FrozenSpans::freeze(vec![a, b]);
        assert_eq!(frozen.as_slice()[0].char_start, 0);
    }

    #[test]
    #[should_panic(expected = "non-overlap invariant violated")]
    fn freeze_panics_on_unresolved_overlap() {
        let a = Span::new("a", "a", 0, 10, FilterType::Name, 0.9, "x");
        let b = Span::new("b", "b", 5, 15, FilterType::Ssn, 0.9, "y");
        FrozenSpans::freeze(vec![a, b]);
    }

    #[test]
    fn set_replacement_mutates_only_that_field() {
        let a = Span::new("a", "a", 0, 1, FilterType::Name, 0.9, "x");
        let mut frozen = FrozenSpans::freeze(vec![a]);
        frozen.set_replacement(0, "[NAME-1]".to_string());
        assert_eq!(frozen.as_slice()[0].replacement.as_deref(), Some("[NAME-1]"));
        assert_eq!(frozen.as_slice()[0].char_start, 0);
    }
}
