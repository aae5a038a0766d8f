//! Arbitration stage 9 — cross-type reasoner (spec §4.4 stage 9).
//!
//! Resolves remaining overlaps between spans. Same-type overlaps merge into
//! a single span covering the union with confidence `max`. Different-type
//! overlaps are resolved by [`crate::span::wins_over`]'s total order:
//! priority, then length, then confidence, then start, then `match_source`.

use crate::span::{sort_by_start, wins_over, Span};

pub fn apply(spans: Vec<Span>, source: &str) -> Vec<Span> {
    let mut sorted = spans;
    sort_by_start(&mut sorted);

    let mut result: Vec<Span> = Vec::with_capacity(sorted.len());
    'outer: for mut current in sorted {
        while let Some(last) = result.last() {
            if !last.overlaps(&current) {
                break;
            }
            let last = result.pop().unwrap();
            if last.filter_type == current.filter_type {
                current = merge_same_type(last, current, source);
                continue;
            }
            if wins_over(&last, &current) {
                result.push(last);
                continue 'outer;
            }
            // `current` wins over `last`; drop `last` and keep checking
            // against whatever is now at the back of `result`.
        }
        result.push(current);
    }
    result
}

fn merge_same_type(a: Span, b: Span, source: &str) -> Span {
    let (first, second) = if a.char_start <= b.char_start { (a, b) } else { (b, a) };
    let char_start = first.char_start;
    let char_end = first.char_end.max(second.char_end);
    let mut merged = first.clone();
    merged.char_start = char_start;
    merged.char_end = char_end;
    merged.text = source[char_start..char_end].to_string();
    merged.original_value = merged.text.clone();
    merged.confidence = first.confidence.max(second.confidence);
    merged.priority = first.priority.max(second.priority);
    if second.match_source != first.match_source {
        merged.match_source = format!("{}+{}", first.match_source, second.match_source);
    }
    merged.touched_by("cross_type_reasoner");
    merged
}
