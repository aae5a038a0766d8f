//! Medical-term allow-list (spec §4.2): disease, drug, procedure, anatomy,
//! and lab vocabulary that must survive redaction even when it collides
//! lexically with a name ("Wilson's disease" vs "Wilson", spec §4.4 stage 3
//! / scenario E2).

use std::collections::HashSet;
use std::sync::{LazyLock, RwLock};

use super::fold::normalize_key;

const MEDICAL_TERMS: &[&str] = &[
    "wilson's disease", "wilsons disease", "parkinson's disease", "parkinsons disease",
    "alzheimer's disease", "alzheimers disease", "crohn's disease", "crohns disease",
    "graves' disease", "graves disease", "hodgkin's lymphoma", "hodgkins lymphoma",
    "addison's disease", "addisons disease", "down syndrome", "diabetes", "hypertension",
    "pneumonia", "bronchitis", "asthma", "copd", "metformin", "lisinopril", "atorvastatin",
    "amlodipine", "metoprolol", "levothyroxine", "omeprazole", "albuterol", "gabapentin",
    "hydrochlorothiazide", "sertraline", "losartan", "warfarin", "insulin", "prednisone",
    "furosemide", "hemoglobin", "hematocrit", "creatinine", "glucose", "cholesterol",
    "triglycerides", "potassium", "sodium", "bilirubin", "platelet", "leukocyte",
    "tachycardia", "bradycardia", "arrhythmia", "myocardial infarction", "stroke",
    "fracture", "laceration", "colonoscopy", "appendectomy", "cholecystectomy",
    "mastectomy", "biopsy", "radiograph", "ultrasound", "echocardiogram",
    "electrocardiogram", "mri", "ct scan", "femur", "tibia", "humerus", "clavicle",
    "vertebra", "pancreas", "liver", "kidney", "thyroid", "pituitary", "hba1c",
    "impression", "findings", "assessment", "plan",
];

fn build_set() -> HashSet<String> {
    MEDICAL_TERMS.iter().map(|e| normalize_key(e)).collect()
}

static MEDICAL_SET: LazyLock<HashSet<String>> = LazyLock::new(build_set);
static EXTRA_TERMS: LazyLock<RwLock<HashSet<String>>> = LazyLock::new(|| RwLock::new(HashSet::new()));

/// Extend the allow-list at process start with a larger clinical vocabulary.
pub fn with_extra_medical_terms(terms: impl IntoIterator<Item = String>) {
    let mut set = EXTRA_TERMS.write().unwrap();
    set.extend(terms.into_iter().map(|t| normalize_key(&t)));
}

pub fn is_medical_term(phrase: &str) -> bool {
    let key = normalize_key(phrase);
    MEDICAL_SET.contains(&key) || EXTRA_TERMS.read().unwrap().contains(&key)
}

/// Whether `phrase` (already lower-cased) contains `needle` as a
/// medical term prefix, used by the vocabulary filter to recognise
/// "Wilson's disease" when the candidate span is just "Wilson's disease"
/// or a superset/subset thereof sharing the same start.
pub fn medical_term_covering(phrase: &str) -> Option<&'static str> {
    let key = normalize_key(phrase);
    MEDICAL_TERMS.iter().find(|&&term| normalize_key(term) == key).copied()
}
