//! Credential suffixes, name prefixes, and structural stopwords/section
//! headers (spec §4.2).

use std::collections::HashSet;
use std::sync::LazyLock;

use super::fold::normalize_key;

/// Credential tokens that anchor the end of a name span, e.g. "Dr. Wilson,
/// **MD**" or "Philip Phillips, **RN**" (spec §4.1(b), scenario E3).
const CREDENTIALS: &[&str] = &["md", "rn", "do", "phd", "np", "pa", "dds", "dvm", "pharmd", "rph"];

/// Title tokens that anchor the start of a name span, e.g. "**Dr.** Wilson".
const PREFIXES: &[&str] = &["dr", "mr", "mrs", "ms", "prof", "rev"];

/// Field labels recognised by the field-context detector (spec §4.4 stage 1).
/// Stored alongside their canonical form.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("patient", "Patient"),
    ("patient name", "Patient"),
    ("name", "Name"),
    ("dob", "DOB"),
    ("date of birth", "DOB"),
    ("mrn", "MRN"),
    ("medical record number", "MRN"),
    ("ssn", "SSN"),
    ("social security number", "SSN"),
    ("phone", "Phone"),
    ("telephone", "Phone"),
    ("fax", "Fax"),
    ("address", "Address"),
    ("email", "Email"),
    ("provider", "Provider"),
    ("physician", "Provider"),
    ("admit date", "AdmitDate"),
    ("admission date", "AdmitDate"),
    ("discharge date", "DischargeDate"),
    ("visit date", "VisitDate"),
    ("date", "Date"),
    ("age", "Age"),
    ("insurance", "Insurance"),
    ("policy number", "HealthPlan"),
    ("account", "Account"),
    ("account number", "Account"),
    ("account no", "Account"),
    ("dea", "Dea"),
    ("dea number", "Dea"),
    ("license", "License"),
    ("driver's license", "License"),
    ("license number", "License"),
    ("passport", "Passport"),
    ("passport number", "Passport"),
];

/// Section headers that read as ALL-CAPS but are structural, not PHI
/// (spec §4.4 stage 4).
const SECTION_HEADERS: &[&str] = &[
    "impression", "findings", "assessment", "plan", "history", "medications",
    "allergies", "vitals", "labs", "diagnosis", "summary", "discharge summary",
    "chief complaint", "review of systems", "physical exam", "social history",
    "family history", "past medical history",
];

fn build_set(entries: &[&str]) -> HashSet<String> {
    entries.iter().map(|e| normalize_key(e)).collect()
}

static CREDENTIAL_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(CREDENTIALS));
static PREFIX_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(PREFIXES));
static SECTION_HEADER_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(SECTION_HEADERS));

pub fn is_credential(word: &str) -> bool {
    let trimmed = word.trim_end_matches('.');
    CREDENTIAL_SET.contains(&normalize_key(trimmed))
}

pub fn is_name_prefix(word: &str) -> bool {
    let trimmed = word.trim_end_matches('.');
    PREFIX_SET.contains(&normalize_key(trimmed))
}

pub fn is_section_header(phrase: &str) -> bool {
    SECTION_HEADER_SET.contains(&normalize_key(phrase))
}

/// Look up the canonical field label for a raw label token (spec §4.4
/// stage 1: "Labels normalise to canonical forms").
pub fn canonical_field_label(raw: &str) -> Option<&'static str> {
    let key = normalize_key(raw.trim());
    FIELD_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_matches_with_and_without_period() {
        assert!(is_credential("MD"));
        assert!(is_credential("RN."));
    }

    #[test]
    fn prefix_matches() {
        assert!(is_name_prefix("Dr."));
        assert!(is_name_prefix("Mrs"));
    }

    #[test]
    fn section_header_matches() {
        assert!(is_section_header("IMPRESSION"));
        assert!(is_section_header("Findings"));
    }

    #[test]
    fn field_label_normalises_to_canonical() {
        assert_eq!(canonical_field_label("Date of Birth"), Some("DOB"));
        assert_eq!(canonical_field_label("mrn"), Some("MRN"));
        assert_eq!(canonical_field_label("unknown label"), None);
    }
}
