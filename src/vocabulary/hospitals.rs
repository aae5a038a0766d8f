//! Hospital / clinic and device-manufacturer name dictionaries (spec §4.2).
//!
//! Device-manufacturer names exist as a *separate* set from hospitals
//! deliberately: scenario E3 requires that a manufacturer name ("Philips")
//! never suppresses a name-family detection that merely shares a lexical
//! root ("Phillips") — the vocabulary filter (§4.4 stage 3) only consults
//! the medical-term allow-list, never this set, for exactly that reason.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::fold::normalize_key;

const HOSPITALS: &[&str] = &[
    "mayo clinic", "cleveland clinic", "johns hopkins hospital", "mass general",
    "massachusetts general hospital", "cedars-sinai", "mount sinai hospital",
    "nyu langone", "ucla medical center", "ucsf medical center", "stanford health care",
    "duke university hospital", "vanderbilt university medical center",
    "barnes-jewish hospital", "northwestern memorial hospital", "kaiser permanente",
    "veterans affairs medical center", "st. jude children's research hospital",
    "memorial sloan kettering", "md anderson cancer center",
];

const DEVICE_MANUFACTURERS: &[&str] = &[
    "philips", "siemens", "ge healthcare", "medtronic", "stryker", "boston scientific",
    "abbott", "becton dickinson", "zimmer biomet", "olympus", "draeger", "hologic",
    "baxter", "fresenius", "terumo",
];

fn build_set(entries: &[&str]) -> HashSet<String> {
    entries.iter().map(|e| normalize_key(e)).collect()
}

static HOSPITAL_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(HOSPITALS));
static DEVICE_SET: LazyLock<HashSet<String>> = LazyLock::new(|| build_set(DEVICE_MANUFACTURERS));

pub fn is_hospital_name(phrase: &str) -> bool {
    HOSPITAL_SET.contains(&normalize_key(phrase))
}

pub fn is_device_manufacturer(phrase: &str) -> bool {
    DEVICE_SET.contains(&normalize_key(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hospital_matches() {
        assert!(is_hospital_name("Mayo Clinic"));
    }

    #[test]
    fn known_manufacturer_matches() {
        assert!(is_device_manufacturer("Philips"));
    }

    #[test]
    fn manufacturer_set_is_distinct_from_names() {
        // "Phillips" (surname, double-l) is not in the manufacturer set,
        // and "Philips" (manufacturer, single-l) must never be consulted
        // by the name-vs-medical-vocabulary filter (E3).
        assert!(!is_device_manufacturer("Phillips"));
    }
}
