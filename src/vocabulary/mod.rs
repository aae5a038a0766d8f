//! Static, load-once, read-only dictionaries (C2, spec §4.2).
//!
//! Every lookup in this module is O(1) expected (a `HashSet` hit on a
//! folded key) except [`phonetic::fuzzy_matches_name_dictionary`], which is
//! documented as an intentional linear scan over the seed dictionaries.
//! Nothing in this module allocates per-call beyond the folded key string;
//! the sets themselves are built once via `std::sync::LazyLock`.

pub mod credentials;
pub mod fold;
pub mod hospitals;
pub mod medical;
pub mod names;
pub mod phonetic;

pub use credentials::{canonical_field_label, is_credential, is_name_prefix, is_section_header};
pub use fold::{normalize_key, ocr_fold_digits, ocr_normalize};
pub use hospitals::{is_device_manufacturer, is_hospital_name};
pub use medical::{is_medical_term, medical_term_covering};
pub use names::{is_any_name, is_given_name, is_surname};

/// Common non-PHI stopwords excluded from name-assembly walks (spec §4.2).
const STOPWORDS: &[&str] = &[
    "the", "and", "of", "with", "for", "to", "in", "on", "at", "by", "a", "an",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word.to_lowercase().as_str())
}
