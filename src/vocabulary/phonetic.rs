//! Phonetic index for fuzzy dictionary matching (spec §4.2: "Double
//! Metaphone or equivalent... `Smyth ≈ Smith` at low additional confidence").
//!
//! This implements a simplified single-key metaphone rather than the full
//! dual-key Double Metaphone algorithm — sufficient for the common-surname
//! confusions the spec calls out, and documented as an Open Question
//! resolution in DESIGN.md rather than a silent shortcut.

use super::names::{is_given_name, is_surname};

/// Reduce a word to a coarse phonetic key: drop vowels (except a leading
/// one), collapse common consonant confusions (`ph`->`f`, `ck`->`k`,
/// `y`->`i` as a vowel sound), and fold doubled letters.
pub fn phonetic_key(word: &str) -> String {
    let lower = word.to_lowercase();
    let lower = lower.replace("ph", "f").replace("ck", "k");

    let mut key = String::new();
    let mut prev: Option<char> = None;
    for (i, c) in lower.chars().enumerate() {
        if !c.is_ascii_alphabetic() {
            continue;
        }
        let folded = match c {
            'y' => 'i',
            'v' => 'f',
            'z' => 's',
            'c' => 'k',
            other => other,
        };
        let is_vowel = matches!(folded, 'a' | 'e' | 'i' | 'o' | 'u');
        if is_vowel && i != 0 {
            // Drop interior vowels; they vary the most across spelling
            // variants ("Smyth" vs "Smith").
            continue;
        }
        if Some(folded) == prev {
            continue; // collapse doubled letters
        }
        key.push(folded);
        prev = Some(folded);
    }
    key
}

/// Whether `word`'s phonetic key matches a known given name or surname.
/// Used by the dictionary detector at a lower confidence than an exact
/// dictionary hit.
pub fn fuzzy_matches_name_dictionary(word: &str) -> bool {
    let key = phonetic_key(word);
    if key.is_empty() {
        return false;
    }
    phonetic_key_matches_known_name(&key)
}

fn phonetic_key_matches_known_name(key: &str) -> bool {
    // Walk the same seed dictionaries through the phonetic key; this is a
    // small fixed list so linear scan is acceptable (dictionaries are
    // hundreds of entries in this reimplementation, not hundreds of
    // thousands as in the original system).
    super::names::GIVEN_NAMES
        .iter()
        .chain(super::names::SURNAMES.iter())
        .any(|candidate| phonetic_key(candidate) == key)
}

/// Convenience check combining exact and fuzzy dictionary membership,
/// returning a confidence multiplier: `1.0` for exact, `0.6` for fuzzy-only,
/// `0.0` for no match.
pub fn name_match_confidence(word: &str) -> f32 {
    if is_given_name(word) || is_surname(word) {
        1.0
    } else if fuzzy_matches_name_dictionary(word) {
        0.6
    } else {
        0.0
    }
}
