//! Shared helpers used across detectors: Luhn validation, proximity to a
//! field label, and context capture. Kept here instead of duplicated per
//! detector file, mirroring how the teacher's safety filters share the
//! `InputModification`/`SanitizedInput` types rather than each layer
//! reinventing them.

use crate::context::RedactionContext;
use crate::span::Span;

/// Standard Luhn checksum, used by the credit-card and NPI detectors.
pub fn luhn_valid(digits: &str) -> bool {
    let digits: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// National Provider Identifier checksum: Luhn over the 10 NPI digits
/// prefixed with the constant "80840" (ISO/IEC 7812 issuer prefix for
/// health-industry numbers), per CMS's published algorithm.
pub fn npi_checksum_valid(ten_digits: &str) -> bool {
    if ten_digits.len() != 10 || !ten_digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let prefixed = format!("80840{ten_digits}");
    luhn_valid(&prefixed)
}

/// Whether `byte_offset` falls within a field-labelled value region whose
/// canonical label is one of `labels` (case as given in `FIELD_LABELS`).
pub fn near_field_label(ctx: &RedactionContext, byte_offset: usize, labels: &[&str]) -> bool {
    ctx.field_map
        .iter()
        .any(|f| byte_offset >= f.value_start && byte_offset < f.value_end && labels.contains(&f.canonical.as_str()))
}

/// Build a [`Span`] with context captured from `source`, the common final
/// step of every detector.
#[allow(clippy::too_many_arguments)]
pub fn make_span(
    source: &str,
    text: &str,
    start: usize,
    end: usize,
    filter_type: crate::span::FilterType,
    confidence: f32,
    match_source: &'static str,
) -> Span {
    let mut span = Span::new(text, &source[start..end], start, end, filter_type, confidence, match_source);
    span.context = Span::capture_context(source, start, end);
    span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_validates_known_good_number() {
        assert!(luhn_valid("4532015112830366"));
    }

    #[test]
    fn luhn_rejects_bad_number() {
        assert!(!luhn_valid("4532015112830367"));
    }

    #[test]
    fn npi_checksum_validates_known_good_npi() {
        // 1234567893 is a commonly cited valid test NPI.
        assert!(npi_checksum_valid("1234567893"));
    }

    #[test]
    fn npi_checksum_rejects_bad_npi() {
        assert!(!npi_checksum_valid("1234567890"));
    }
}
