//! NAME / FIRST_NAME / LAST_NAME detector (spec §4.1(b)): dictionary-driven
//! person-name assembly. Walks capitalised word runs, classifies each word
//! against the given-name and surname dictionaries (exact or phonetic-fuzzy),
//! and anchors on credential/prefix tokens per scenario E3. Priority 300.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};
use crate::vocabulary::{is_credential, is_given_name, is_name_prefix, is_surname};
use crate::vocabulary::phonetic::name_match_confidence;

use super::common::make_span;

const SOURCE: &str = "name_detector";

static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z][a-zA-Z'-]*\.?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
enum WordRole {
    Prefix,
    Given,
    Sur,
    Credential,
    Unknown,
}

struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    role: WordRole,
    confidence: f32,
}

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    let words = classify_words(text);
    let runs = group_runs(text, &words);
    let mut spans = Vec::new();

    for run in runs {
        let run = trim_unknown_edges(&run);
        if run.is_empty() {
            continue;
        }

        let given_count = run.iter().filter(|w| w.role == WordRole::Given).count();
        let sur_count = run.iter().filter(|w| w.role == WordRole::Sur).count();
        if given_count == 0 && sur_count == 0 {
            continue;
        }

        let start = run.first().unwrap().start;
        let end = run.last().unwrap().end;
        let confidence = run.iter().map(|w| w.confidence).fold(0.0_f32, f32::max).max(0.6);

        let filter_type = if given_count > 0 && sur_count > 0 {
            FilterType::Name
        } else if given_count > 0 {
            FilterType::FirstName
        } else {
            FilterType::LastName
        };

        spans.push(make_span(text, &text[start..end], start, end, filter_type, confidence, SOURCE));
    }

    spans
}

fn classify_words(text: &str) -> Vec<Word<'_>> {
    CAPITALIZED_WORD
        .find_iter(text)
        .map(|m| {
            let word = m.as_str();
            let trimmed = word.trim_end_matches('.');
            let role = if is_name_prefix(trimmed) {
                WordRole::Prefix
            } else if is_credential(trimmed) {
                WordRole::Credential
            } else if is_given_name(trimmed) {
                WordRole::Given
            } else if is_surname(trimmed) {
                WordRole::Sur
            } else {
                WordRole::Unknown
            };
            let confidence = match role {
                WordRole::Given | WordRole::Sur => name_match_confidence(trimmed),
                _ => 0.0,
            };
            Word { text: word, start: m.start(), end: m.end(), role, confidence }
        })
        .collect()
}

/// Group adjacent capitalised words (allowing a prefix to lead and a
/// credential to trail) into runs that contain at least one dictionary hit.
///
/// A single `", "` between two name-family words is also treated as
/// adjacency — the clinical "LASTNAME, First Middle" convention (spec §4.1(c)
/// lists LAST-NAME-FIRST as one of the structural detector shapes) — so
/// `"JOHNSON, MARY ELIZABETH"` assembles into one run rather than two.
fn group_runs<'a>(text: &str, words: &'a [Word<'a>]) -> Vec<Vec<&'a Word<'a>>> {
    let mut runs: Vec<Vec<&Word>> = Vec::new();
    let mut current: Vec<&Word> = Vec::new();
    let mut prev_end: Option<usize> = None;

    for word in words {
        let adjacent = prev_end
            .map(|e| word.start.saturating_sub(e) <= 1 || is_last_name_first_separator(text, e, word.start))
            .unwrap_or(false);
        let continues = adjacent
            && matches!(word.role, WordRole::Given | WordRole::Sur | WordRole::Prefix | WordRole::Credential);

        if !adjacent || (!continues && !current.is_empty()) {
            flush(&mut runs, &mut current);
        }
        current.push(word);
        prev_end = Some(word.end);

        if word.role == WordRole::Credential {
            flush(&mut runs, &mut current);
            prev_end = None;
        }
    }
    flush(&mut runs, &mut current);
    runs
}

/// Whether `text[prev_end..next_start]` is exactly `", "` (the separator
/// between a surname and a following given name in last-name-first order).
fn is_last_name_first_separator(text: &str, prev_end: usize, next_start: usize) -> bool {
    text.get(prev_end..next_start) == Some(", ")
}

/// Drops leading/trailing words with role `Unknown` from a run, so a run
/// that only absorbed a dictionary hit because it sat one space away from
/// an unrelated capitalised word (e.g. `"Patient John Smith"`) starts and
/// ends at its first/last name-family word instead of swallowing the
/// unrelated word into the emitted span.
fn trim_unknown_edges<'a>(run: &[&'a Word<'a>]) -> Vec<&'a Word<'a>> {
    let mut slice = run;
    while let [first, rest @ ..] = slice {
        if first.role == WordRole::Unknown {
            slice = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = slice {
        if last.role == WordRole::Unknown {
            slice = rest;
        } else {
            break;
        }
    }
    slice.to_vec()
}

fn flush<'a>(runs: &mut Vec<Vec<&'a Word<'a>>>, current: &mut Vec<&'a Word<'a>>) {
    if !current.is_empty() {
        runs.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn ctx() -> RedactionContext {
        RedactionContext::new(Policy::default())
    }

    #[test]
    fn detects_full_name() {
        let spans = detect("Patient John Smith arrived", &ctx());
        assert!(spans.iter().any(|s| s.filter_type == FilterType::Name && s.text.contains("John")));
    }

    #[test]
    fn credential_anchors_trailing_name() {
        let spans = detect("Seen by Philip Phillips, MD this morning", &ctx());
        assert!(spans.iter().any(|s| s.text.contains("Phillips")));
    }

    #[test]
    fn prefix_anchors_leading_name() {
        let spans = detect("Dr. Wilson reviewed the chart", &ctx());
        assert!(spans.iter().any(|s| s.text.contains("Wilson")));
    }

    #[test]
    fn unrelated_capitalised_phrase_without_dictionary_hit_is_skipped() {
        let spans = detect("The Quarterly Report was filed", &ctx());
        assert!(spans.is_empty());
    }

    #[test]
    fn given_name_only_tags_first_name() {
        let spans = detect("contact Emily regarding billing", &ctx());
        assert!(spans.iter().any(|s| s.filter_type == FilterType::FirstName));
    }

    #[test]
    fn last_name_first_with_comma_assembles_into_one_span() {
        let spans = detect("Patient: JOHNSON, MARY ELIZABETH", &ctx());
        assert!(spans.iter().any(|s| s.filter_type == FilterType::Name && s.text == "JOHNSON, MARY ELIZABETH"));
    }

    #[test]
    fn two_spaces_after_comma_does_not_falsely_merge() {
        let spans = detect("The Johnson,  Quarterly Report was filed", &ctx());
        assert!(!spans.iter().any(|s| s.text.contains("Johnson,  Quarterly")));
    }

    #[test]
    fn leading_unrelated_capitalised_word_is_not_absorbed_into_name_span() {
        let spans = detect("Patient John Smith arrived", &ctx());
        let name = spans.iter().find(|s| s.filter_type == FilterType::Name).expect("name span");
        assert_eq!(name.text, "John Smith");
    }
}
