//! Given-name and surname dictionaries (spec §4.2).
//!
//! The original system ships hundreds of thousands of entries; this
//! reimplementation ships a curated, representative seed list (documented
//! in DESIGN.md as an explicit Open Question resolution) plus an extension
//! point so a host application can load a larger corpus at process start
//! without touching the detection code.

use std::collections::HashSet;
use std::sync::{LazyLock, RwLock};

use super::fold::normalize_key;

/// Seed list of common US given names (folded keys already lower-case ASCII).
pub(crate) const GIVEN_NAMES: &[&str] = &[
    "james", "mary", "robert", "patricia", "john", "jennifer", "michael", "linda",
    "david", "elizabeth", "william", "barbara", "richard", "susan", "joseph", "jessica",
    "thomas", "sarah", "charles", "karen", "christopher", "nancy", "daniel", "lisa",
    "matthew", "margaret", "anthony", "betty", "mark", "sandra", "donald", "ashley",
    "steven", "kimberly", "andrew", "emily", "paul", "donna", "joshua", "michelle",
    "kenneth", "carol", "kevin", "amanda", "brian", "melissa", "george", "deborah",
    "edward", "stephanie", "ronald", "rebecca", "timothy", "laura", "jason", "sharon",
    "jeffrey", "cynthia", "ryan", "kathleen", "jacob", "amy", "gary", "angela",
    "nicholas", "shirley", "eric", "anna", "jonathan", "brenda", "stephen", "pamela",
    "larry", "emma", "justin", "nicole", "scott", "helen", "brandon", "samantha",
    "benjamin", "katherine", "samuel", "christine", "gregory", "debra", "alexander",
    "rachel", "frank", "catherine", "patrick", "carolyn", "raymond", "janet", "jack",
    "ruth", "dennis", "maria", "jerry", "heather", "tyler", "diane", "aaron", "virginia",
    "philip", "julie", "mary elizabeth", "mary jo",
];

/// Seed list of common US surnames.
pub(crate) const SURNAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis",
    "rodriguez", "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson",
    "thomas", "taylor", "moore", "jackson", "martin", "lee", "perez", "thompson",
    "white", "harris", "sanchez", "clark", "ramirez", "lewis", "robinson", "walker",
    "young", "allen", "king", "wright", "scott", "torres", "nguyen", "hill", "flores",
    "green", "adams", "nelson", "baker", "hall", "rivera", "campbell", "mitchell",
    "carter", "roberts", "gomez", "phillips", "evans", "turner", "diaz", "parker",
    "cruz", "edwards", "collins", "reyes", "stewart", "morris", "morales", "murphy",
    "cook", "rogers", "gutierrez", "ortiz", "morgan", "cooper", "peterson", "bailey",
    "reed", "kelly", "howard", "ramos", "kim", "cox", "ward", "richardson", "watson",
    "brooks", "chavez", "wood", "james", "bennett", "gray", "mendoza", "ruiz", "hughes",
    "price", "alvarez", "castillo", "sanders", "patel", "myers", "long", "ross",
    "foster", "jimenez", "wilson johnson", "phillips",
];

fn build_set(entries: &[&str]) -> HashSet<String> {
    entries.iter().map(|e| normalize_key(e)).collect()
}

static GIVEN_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(GIVEN_NAMES));
static SURNAME_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(SURNAMES));

static EXTRA_GIVEN: LazyLock<RwLock<HashSet<String>>> = LazyLock::new(|| RwLock::new(HashSet::new()));
static EXTRA_SURNAME: LazyLock<RwLock<HashSet<String>>> = LazyLock::new(|| RwLock::new(HashSet::new()));

/// Extend the given-name dictionary at process start with a larger corpus.
pub fn with_extra_given_names(names: impl IntoIterator<Item = String>) {
    let mut set = EXTRA_GIVEN.write().unwrap();
    set.extend(names.into_iter().map(|n| normalize_key(&n)));
}

/// Extend the surname dictionary at process start with a larger corpus.
pub fn with_extra_surnames(names: impl IntoIterator<Item = String>) {
    let mut set = EXTRA_SURNAME.write().unwrap();
    set.extend(names.into_iter().map(|n| normalize_key(&n)));
}

pub fn is_given_name(word: &str) -> bool {
    let key = normalize_key(word);
    GIVEN_SET.contains(&key) || EXTRA_GIVEN.read().unwrap().contains(&key)
}

pub fn is_surname(word: &str) -> bool {
    let key = normalize_key(word);
    SURNAME_SET.contains(&key) || EXTRA_SURNAME.read().unwrap().contains(&key)
}

pub fn is_any_name(word: &str) -> bool {
    is_given_name(word) || is_surname(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_given_name_matches() {
        assert!(is_given_name("Mary"));
        assert!(is_given_name("JOHN"));
    }

    #[test]
    fn known_surname_matches() {
        assert!(is_surname("Johnson"));
        assert!(is_surname("smith"));
    }

    #[test]
    fn unknown_word_does_not_match() {
        assert!(!is_any_name("Metformin"));
        assert!(!is_any_name("Pneumonia"));
    }

    #[test]
    fn extension_point_adds_entries() {
        assert!(!is_surname("Zzyzxolotl"));
        with_extra_surnames(["Zzyzxolotl".to_string()]);
        assert!(is_surname("Zzyzxolotl"));
    }

    #[test]
    fn diacritics_fold_before_lookup() {
        with_extra_surnames(["Gonzalez".to_string()]);
        assert!(is_surname("Gónzalez") || is_surname("Gonzalez"));
    }
}
